use serde::{Deserialize, Serialize};

/// A boundary condition tag, independently selectable for the west and
/// east edge of the grid.
///
/// `Sandbox` from the source this was ported from is intentionally not
/// represented here — it was an experimental, never-finished attempt at
/// non-zero Dirichlet values and the spec this crate implements says not
/// to port it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundaryCondition {
    /// w pinned to 0 at the boundary.
    Dirichlet,
    /// w = 0 and dw/dx = 0.
    Dirichlet0Neumann0,
    /// Wraparound coupling to the opposite edge.
    Periodic,
    /// Physically extend q (and Te) by one flexural wavelength, then
    /// apply `inner` on the padded edge.
    Mirror { inner: Box<BoundaryCondition> },
    /// Mirror-symmetric about the boundary.
    Symmetric,
    /// dw/dx = 0 (zero gradient).
    Neumann,
    /// d2w/dx2 = d3w/dx3 = 0 (free end).
    ZeroMomentZeroShear,
    /// Reserved boundary for padded edges; its coefficients were never
    /// specified in the source this was ported from. Selecting it
    /// always fails at solve time with `FlexureError::StewartUnspecified`.
    Stewart1,
}

impl BoundaryCondition {
    pub fn is_periodic(&self) -> bool {
        matches!(self, BoundaryCondition::Periodic)
    }

    pub fn is_mirror(&self) -> bool {
        matches!(self, BoundaryCondition::Mirror { .. })
    }

    pub fn mirror_inner(inner: BoundaryCondition) -> Self {
        BoundaryCondition::Mirror {
            inner: Box::new(inner),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoundaryCondition::Dirichlet => "Dirichlet",
            BoundaryCondition::Dirichlet0Neumann0 => "Dirichlet0_Neumann0",
            BoundaryCondition::Periodic => "Periodic",
            BoundaryCondition::Mirror { .. } => "Mirror",
            BoundaryCondition::Symmetric => "Symmetric",
            BoundaryCondition::Neumann => "Neumann",
            BoundaryCondition::ZeroMomentZeroShear => "0Moment0Shear",
            BoundaryCondition::Stewart1 => "Stewart1",
        }
    }
}

impl std::fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
