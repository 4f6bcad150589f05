//! Parameter preparation: elastic thickness -> flexural rigidity.

use serde::{Deserialize, Serialize};

/// Elastic thickness, either uniform across the grid or gridded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElasticThickness {
    Scalar(f64),
    Gridded(Vec<f64>),
}

impl ElasticThickness {
    pub fn is_scalar(&self) -> bool {
        matches!(self, ElasticThickness::Scalar(_))
    }

    pub fn len(&self, n: usize) -> usize {
        match self {
            ElasticThickness::Scalar(_) => n,
            ElasticThickness::Gridded(te) => te.len(),
        }
    }
}

/// Flexural rigidity D(x), same shape as the `Te` it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub enum Rigidity {
    Scalar(f64),
    Gridded(Vec<f64>),
}

impl Rigidity {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Rigidity::Scalar(_))
    }

    /// Maximum rigidity over the domain, used by the Mirror padding
    /// stage to estimate the maximum flexural wavelength.
    pub fn max(&self) -> f64 {
        match self {
            Rigidity::Scalar(d) => *d,
            Rigidity::Gridded(d) => d.iter().cloned().fold(f64::MIN, f64::max),
        }
    }

    pub fn at(&self, i: usize) -> f64 {
        match self {
            Rigidity::Scalar(d) => *d,
            Rigidity::Gridded(d) => d[i],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Rigidity::Scalar(_) => 0,
            Rigidity::Gridded(d) => d.len(),
        }
    }
}

/// D = E * Te^3 / (12 * (1 - nu^2)), elementwise when Te is gridded.
pub fn flexural_rigidity(te: &ElasticThickness, e: f64, nu: f64) -> Rigidity {
    let factor = e / (12.0 * (1.0 - nu * nu));
    match te {
        ElasticThickness::Scalar(t) => Rigidity::Scalar(factor * t.powi(3)),
        ElasticThickness::Gridded(ts) => {
            Rigidity::Gridded(ts.iter().map(|t| factor * t.powi(3)).collect())
        }
    }
}

/// dx^4, used throughout the stencil formulas.
pub fn dx4(dx: f64) -> f64 {
    dx.powi(4)
}
