//! Mirror boundary-condition domain padding.
//!
//! `Mirror` is not itself a row-rewrite rule: it physically extends the
//! grid by (up to) one flexural wavelength, filling the extension with
//! a mirror reflection of `q` (zero-padded if the domain is shorter
//! than a wavelength, truncated if longer), then applies a concrete
//! boundary condition on the new, padded edge. The concrete rules for
//! picking that edge condition, and for folding both sides into a
//! single periodic grid when the padding lengths line up just right,
//! come from the source this was ported from (`BC_Mirror` /
//! `padded_edges_BCs` / `pad_Te` / `back_to_original_q0_Te_w`).

use crate::bc::BoundaryCondition;
use crate::error::FlexureResult;
use crate::params::{flexural_rigidity, ElasticThickness, Rigidity};

/// One flexural wavelength, in grid cells, using the largest rigidity
/// on the domain (`spec.md` 4.4 / `calc_max_flexural_wavelength`).
pub fn max_flexural_wavelength_ncells(rigidity: &Rigidity, rho_g: f64, dx: f64) -> usize {
    let d_max = rigidity.max();
    let alpha = (4.0 * d_max / rho_g).powf(0.25);
    let wavelength = 2.0 * std::f64::consts::PI * alpha;
    (wavelength / dx).ceil() as usize
}

/// If exactly one of a `Mirror`/`Periodic` pair is present, the source
/// this was ported from promotes the `Periodic` side to `Mirror` too,
/// since a lone periodic edge facing a padded one is rarely what was
/// intended and the combination halves the effective padding needed.
pub fn promote_periodic_paired_with_mirror(
    west: BoundaryCondition,
    east: BoundaryCondition,
) -> (BoundaryCondition, BoundaryCondition) {
    let one_mirror = west.is_mirror() || east.is_mirror();
    let one_periodic = west.is_periodic() || east.is_periodic();
    if one_mirror && one_periodic {
        eprintln!(
            "flexure_core: west={} east={} pairs Mirror with a lone Periodic edge; \
             promoting the Periodic side to Mirror (default inner Dirichlet)",
            west.label(),
            east.label()
        );
        let mirror_default = BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet);
        (
            if west.is_mirror() { west } else { mirror_default.clone() },
            if east.is_mirror() { east } else { mirror_default },
        )
    } else {
        (west, east)
    }
}

/// The result of padding a grid for one or two `Mirror` edges: the
/// extended load/rigidity, the concrete (non-`Mirror`) boundary tags
/// now in force on each edge, and enough information to trim the
/// solution back down afterward.
pub struct PaddedGrid {
    pub q: Vec<f64>,
    pub te: ElasticThickness,
    pub west_bc: BoundaryCondition,
    pub east_bc: BoundaryCondition,
    pub unpad: UnpadPlan,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnpadPlan {
    n_pad: usize,
    west_padded: bool,
    east_padded: bool,
    glom_periodic: bool,
    original_len: usize,
}

impl UnpadPlan {
    /// No padding happened; `w` is returned unchanged.
    pub fn identity(n: usize) -> Self {
        UnpadPlan {
            n_pad: 0,
            west_padded: false,
            east_padded: false,
            glom_periodic: false,
            original_len: n,
        }
    }

    pub fn apply(&self, w: &[f64]) -> Vec<f64> {
        if !self.west_padded && !self.east_padded {
            return w.to_vec();
        }
        if self.west_padded && self.east_padded {
            if self.glom_periodic {
                w[..self.original_len].to_vec()
            } else {
                w[self.n_pad..w.len() - self.n_pad].to_vec()
            }
        } else if self.west_padded {
            w[self.n_pad..].to_vec()
        } else {
            w[..w.len() - self.n_pad].to_vec()
        }
    }
}

/// Builds the length-`n_pad` mirror segment appended (or, on the west
/// side, prepended) to the grid. `fill` replaces the mirror once the
/// domain itself is shorter than `n_pad`.
fn mirror_segment(x: &[f64], n_pad: usize, fill: f64, west: bool) -> Vec<f64> {
    let reversed: Vec<f64> = x.iter().rev().cloned().collect();
    if reversed.len() >= n_pad {
        if west {
            reversed[reversed.len() - n_pad..].to_vec()
        } else {
            reversed[..n_pad].to_vec()
        }
    } else {
        let fill_len = n_pad - reversed.len();
        let pad = vec![fill; fill_len];
        if west {
            [pad, reversed].concat()
        } else {
            [reversed, pad].concat()
        }
    }
}

/// Picks the boundary tag a lone padded edge must use: `spec.md` 4.4
/// says the padded side always takes `Stewart1` (scalar rigidity) or
/// `Dirichlet` (gridded), regardless of what the *opposite*, non-Mirror
/// edge is declared as — that opposite edge keeps its own declared BC
/// unchanged (see the call sites in `pad_for_mirror`, which only use
/// this for the padded side and otherwise pass the other side through
/// untouched).
fn effective_bc_for_padded_edge(rigidity: &Rigidity) -> BoundaryCondition {
    if rigidity.is_scalar() {
        BoundaryCondition::Stewart1
    } else {
        BoundaryCondition::Dirichlet
    }
}

fn pad_te_single_side(te: &ElasticThickness, n_pad: usize, west: bool) -> ElasticThickness {
    match te {
        ElasticThickness::Scalar(_) => te.clone(),
        ElasticThickness::Gridded(values) => {
            let edge = if west { values[0] } else { values[values.len() - 1] };
            let segment = mirror_segment(values, n_pad, edge, west);
            let combined = if west {
                [segment, values.clone()].concat()
            } else {
                [values.clone(), segment].concat()
            };
            ElasticThickness::Gridded(combined)
        }
    }
}

/// Applies `Mirror` padding to `q`/`te` for whichever of `west_bc`,
/// `east_bc` are `Mirror`. Returns the tags now unchanged.
pub fn pad_for_mirror(
    q: &[f64],
    te: &ElasticThickness,
    west_bc: BoundaryCondition,
    east_bc: BoundaryCondition,
    e: f64,
    nu: f64,
    rho_g: f64,
    dx: f64,
) -> FlexureResult<PaddedGrid> {
    if !west_bc.is_mirror() && !east_bc.is_mirror() {
        return Ok(PaddedGrid {
            q: q.to_vec(),
            te: te.clone(),
            west_bc,
            east_bc,
            unpad: UnpadPlan::identity(q.len()),
        });
    }

    let rigidity = flexural_rigidity(te, e, nu);
    let n = q.len();
    let n_pad = max_flexural_wavelength_ncells(&rigidity, rho_g, dx);

    if west_bc.is_mirror() && east_bc.is_mirror() {
        let glom = n < n_pad || n > 2 * n_pad;
        let (q_padded, te_padded, effective) = if glom {
            let west_seg = mirror_segment(q, n_pad, 0.0, true);
            let east_seg = mirror_segment(q, n_pad, 0.0, false);
            let q_padded = [west_seg, q.to_vec(), east_seg].concat();
            let te_padded = pad_te_both_glom(te, n_pad);
            (q_padded, te_padded, effective_bc_for_padded_edge(&rigidity))
        } else {
            let mirror = mirror_segment(q, n, 0.0, false); // full reversal, no truncation
            let q_padded = [q.to_vec(), mirror].concat();
            let te_padded = pad_te_both_periodic(te);
            (q_padded, te_padded, BoundaryCondition::Periodic)
        };

        Ok(PaddedGrid {
            q: q_padded,
            te: te_padded,
            west_bc: effective.clone(),
            east_bc: effective,
            unpad: UnpadPlan {
                n_pad,
                west_padded: true,
                east_padded: true,
                glom_periodic: !glom,
                original_len: n,
            },
        })
    } else if west_bc.is_mirror() {
        let effective = effective_bc_for_padded_edge(&rigidity);
        let edge = match te {
            ElasticThickness::Scalar(_) => 0.0,
            ElasticThickness::Gridded(v) => v[0],
        };
        let west_seg = mirror_segment(q, n_pad, edge, true);
        let q_padded = [west_seg, q.to_vec()].concat();
        let te_padded = pad_te_single_side(te, n_pad, true);
        Ok(PaddedGrid {
            q: q_padded,
            te: te_padded,
            west_bc: effective,
            east_bc,
            unpad: UnpadPlan {
                n_pad,
                west_padded: true,
                east_padded: false,
                glom_periodic: false,
                original_len: n,
            },
        })
    } else {
        let effective = effective_bc_for_padded_edge(&rigidity);
        let edge = match te {
            ElasticThickness::Scalar(_) => 0.0,
            ElasticThickness::Gridded(v) => v[v.len() - 1],
        };
        let east_seg = mirror_segment(q, n_pad, edge, false);
        let q_padded = [q.to_vec(), east_seg].concat();
        let te_padded = pad_te_single_side(te, n_pad, false);
        Ok(PaddedGrid {
            q: q_padded,
            te: te_padded,
            west_bc,
            east_bc: effective,
            unpad: UnpadPlan {
                n_pad,
                west_padded: false,
                east_padded: true,
                glom_periodic: false,
                original_len: n,
            },
        })
    }
}

/// Te padding for the both-sides-Mirror glom case (too short or too
/// long for a single wavelength). Each side replicates its own edge
/// value into the fill region rather than, as in the source this was
/// ported from, the west edge value leaking into the east fill (an
/// apparent copy-paste artifact there); see DESIGN.md.
fn pad_te_both_glom(te: &ElasticThickness, n_pad: usize) -> ElasticThickness {
    match te {
        ElasticThickness::Scalar(_) => te.clone(),
        ElasticThickness::Gridded(values) => {
            let west_edge = values[0];
            let east_edge = values[values.len() - 1];
            let west_seg = mirror_segment(values, n_pad, west_edge, true);
            let east_seg = mirror_segment(values, n_pad, east_edge, false);
            ElasticThickness::Gridded([west_seg, values.clone(), east_seg].concat())
        }
    }
}

/// Te padding for the both-sides-Mirror "just right" (periodic) case.
/// Uses the full reversed Te array so the padded Te stays the same
/// length as the padded q (`spec.md` 4.4); the source this was ported
/// from instead drops Te's two endpoints here, which would leave Te
/// two cells shorter than q.
fn pad_te_both_periodic(te: &ElasticThickness) -> ElasticThickness {
    match te {
        ElasticThickness::Scalar(_) => te.clone(),
        ElasticThickness::Gridded(values) => {
            let mirror: Vec<f64> = values.iter().rev().cloned().collect();
            ElasticThickness::Gridded([values.clone(), mirror].concat())
        }
    }
}
