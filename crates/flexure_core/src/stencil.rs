//! The central pentadiagonal stencil: d2/dx2[D(x) d2w/dx2] + drho*g*w = q(x).

use crate::params::Rigidity;

/// The five diagonals of the (not yet boundary-rewritten, not yet
/// shifted) pentadiagonal operator, one entry per grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagonals {
    pub l2: Vec<f64>,
    pub l1: Vec<f64>,
    pub c0: Vec<f64>,
    pub r1: Vec<f64>,
    pub r2: Vec<f64>,
}

impl Diagonals {
    pub fn len(&self) -> usize {
        self.c0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.c0.is_empty()
    }
}

/// The five stencil coefficients for one row, given the rigidity at
/// that row and its two neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowCoeffs {
    pub l2: f64,
    pub l1: f64,
    pub c0: f64,
    pub r1: f64,
    pub r2: f64,
}

/// Variable-D row formula (`spec.md` 4.2), valid for any row once
/// `d_west`/`d_east` are known (in the strict interior they are simply
/// `D[i-1]`/`D[i+1]`; at the domain edge a boundary rewrite or an
/// extrapolation rule supplies them instead).
pub fn variable_row(d_west: f64, d_here: f64, d_east: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    RowCoeffs {
        l2: (d_west / 2.0 + d_here - d_east / 2.0) / dx4,
        l1: (-6.0 * d_here + 2.0 * d_east) / dx4,
        c0: (-2.0 * d_west + 10.0 * d_here - 2.0 * d_east) / dx4 + rho_g,
        r1: (2.0 * d_west - 6.0 * d_here) / dx4,
        r2: (-d_west / 2.0 + d_here + d_east / 2.0) / dx4,
    }
}

/// Constant-D row formula: the biharmonic stencil [1,-4,6,-4,1]*D/dx4
/// with drho*g added to the center. This is the degenerate case of
/// [`variable_row`] when `d_west == d_here == d_east` (see the
/// `constant_limit_matches_variable_formula` test below).
pub fn constant_row(d: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    RowCoeffs {
        l2: d / dx4,
        l1: -4.0 * d / dx4,
        c0: 6.0 * d / dx4 + rho_g,
        r1: -4.0 * d / dx4,
        r2: d / dx4,
    }
}

/// How rigidity is extrapolated one cell beyond the domain edge when a
/// boundary rewrite needs a `D` value that does not exist on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DExtrapolation {
    /// D_ghost = 2*D_edge - D_neighbor (zero curvature).
    ZeroCurvature,
    /// D_ghost = D_neighbor (mirror-symmetric).
    Symmetric,
    /// D_ghost = D_edge (clamp/copy-edge; used when a BC performs no
    /// explicit rewrite at all, see DESIGN.md).
    Clamp,
}

impl DExtrapolation {
    pub fn ghost(self, d_edge: f64, d_neighbor: f64) -> f64 {
        match self {
            DExtrapolation::ZeroCurvature => 2.0 * d_edge - d_neighbor,
            DExtrapolation::Symmetric => d_neighbor,
            DExtrapolation::Clamp => d_edge,
        }
    }
}

/// Builds the full-length diagonals before any boundary rewrite.
///
/// Strictly interior rows (`2 <= i <= n-3`) always use the exact
/// variable-D formula with real neighbors. The four edge rows (west
/// `i=0,1`, east `i=n-2,n-1`) need a neighbor that doesn't exist on the
/// grid:
/// - `periodic = false` uses [`DExtrapolation::Clamp`], a value that is
///   never actually read (the boundary rewrite either overwrites the
///   row outright, or, for `Dirichlet`, the row's off-grid columns are
///   skipped at assembly) — see the `PoisonedStencil` check in
///   `crate::operator`.
/// - `periodic = true` wraps the index around the grid instead, since
///   `Periodic` performs no boundary rewrite at all and relies on these
///   rows already holding the true wraparound coefficients.
pub fn build_diagonals(d: &Rigidity, dx4: f64, rho_g: f64, n: usize, periodic: bool) -> Diagonals {
    let mut l2 = vec![0.0; n];
    let mut l1 = vec![0.0; n];
    let mut c0 = vec![0.0; n];
    let mut r1 = vec![0.0; n];
    let mut r2 = vec![0.0; n];

    match d {
        Rigidity::Scalar(dv) => {
            let row = constant_row(*dv, dx4, rho_g);
            for i in 0..n {
                l2[i] = row.l2;
                l1[i] = row.l1;
                c0[i] = row.c0;
                r1[i] = row.r1;
                r2[i] = row.r2;
            }
        }
        Rigidity::Gridded(dg) => {
            for i in 0..n {
                let d_here = dg[i];
                let d_west = if i > 0 {
                    dg[i - 1]
                } else if periodic {
                    dg[n - 1]
                } else {
                    DExtrapolation::Clamp.ghost(d_here, d_here)
                };
                let d_east = if i + 1 < n {
                    dg[i + 1]
                } else if periodic {
                    dg[0]
                } else {
                    DExtrapolation::Clamp.ghost(d_here, d_here)
                };
                let row = variable_row(d_west, d_here, d_east, dx4, rho_g);
                l2[i] = row.l2;
                l1[i] = row.l1;
                c0[i] = row.c0;
                r1[i] = row.r1;
                r2[i] = row.r2;
            }
        }
    }

    Diagonals { l2, l1, c0, r1, r2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_limit_matches_variable_formula() {
        let d = 7.1111e19_f64;
        let dx4 = 10_000f64.powi(4);
        let rho_g = 600.0 * 9.8;
        let constant = constant_row(d, dx4, rho_g);
        let variable = variable_row(d, d, d, dx4, rho_g);
        assert_relative_eq!(constant.l2, variable.l2, max_relative = 1e-12);
        assert_relative_eq!(constant.l1, variable.l1, max_relative = 1e-12);
        assert_relative_eq!(constant.c0, variable.c0, max_relative = 1e-12);
        assert_relative_eq!(constant.r1, variable.r1, max_relative = 1e-12);
        assert_relative_eq!(constant.r2, variable.r2, max_relative = 1e-12);
    }

    #[test]
    fn build_diagonals_scalar_is_uniform() {
        let d = Rigidity::Scalar(7.1111e19);
        let dx4 = 10_000f64.powi(4);
        let rho_g = 600.0 * 9.8;
        let diag = build_diagonals(&d, dx4, rho_g, 101, false);
        let row0 = diag.c0[0];
        assert!(diag.c0.iter().all(|&c| (c - row0).abs() < 1e-6));
    }

    #[test]
    fn build_diagonals_gridded_matches_scalar_when_uniform() {
        let n = 21;
        let scalar = Rigidity::Scalar(7.1111e19);
        let gridded = Rigidity::Gridded(vec![7.1111e19; n]);
        let dx4 = 10_000f64.powi(4);
        let rho_g = 600.0 * 9.8;
        let a = build_diagonals(&scalar, dx4, rho_g, n, false);
        let b = build_diagonals(&gridded, dx4, rho_g, n, false);
        for i in 0..n {
            assert_relative_eq!(a.l2[i], b.l2[i], max_relative = 1e-8);
            assert_relative_eq!(a.c0[i], b.c0[i], max_relative = 1e-8);
            assert_relative_eq!(a.r2[i], b.r2[i], max_relative = 1e-8);
        }
    }
}
