pub mod bc;
pub mod boundary;
pub mod error;
pub mod operator;
pub mod padding;
pub mod params;
pub mod request;
pub mod solve;
pub mod spa;
pub mod stencil;
/// The `flexure_core` crate provides the numerical engine for 1-D elastic-plate
/// flexure: given a load q(x) on a thin elastic plate floating on a dense fluid
/// substrate, compute the deflection w(x).
///
/// Key components:
/// - **Stencil**: the pentadiagonal finite-difference operator for
///   d2/dx2[D(x) d2w/dx2] + drho*g*w = q(x), constant- and variable-rigidity.
/// - **Boundary**: the zoo of edge conditions (Dirichlet, Neumann, symmetric,
///   free-end, periodic, Mirror-with-domain-padding) and their row rewrites.
/// - **Operator / Solve**: sparse assembly (for poison checking) plus a direct
///   banded pentadiagonal solver, with a Sherman-Morrison-Woodbury correction
///   for Periodic's wraparound couplings.
/// - **Spa**: the analytical point-load Green's-function companion path.

pub use bc::BoundaryCondition;
pub use error::{FlexureError, FlexureResult};
pub use params::{ElasticThickness, Rigidity};
pub use request::{solve, FlexureRequest, Method, SolveReport};
