//! The analytical ("SPA") solution path: direct superposition of the
//! point-load Green's function, rather than a linear solve. `spec.md`
//! calls this "trivial once the kernel is specified" and keeps it out
//! of the FD core's scope; this module is the whole of that kernel.

use crate::error::FlexureResult;

/// w(x) contribution from a single point load q0 at distance r, for
/// flexural parameter alpha, under the FD sign convention (positive
/// load -> positive, downward deflection) established for `Method::Fd`.
///
/// The literal kernel this was ported from carries a leading minus
/// sign (q as a *negative* contribution); dropped here so this
/// agrees with the FD path's convention instead of the opposite one
/// (see DESIGN.md's sign-convention note).
fn green(r: f64, q0: f64, alpha: f64, d: f64) -> f64 {
    let u = r.abs() / alpha;
    q0 * (alpha.powi(3) / (8.0 * d)) * (-u).exp() * (u.cos() + u.sin())
}

fn alpha_of(d: f64, rho_g: f64) -> f64 {
    (4.0 * d / rho_g).powf(0.25)
}

/// `Method::Spa`: uniform grid, scalar Te. Direct O(N^2) convolution of
/// `q` (spaced `dx` apart) against the point-load kernel.
pub fn solve_uniform(q: &[f64], dx: f64, d: f64, rho_g: f64) -> FlexureResult<Vec<f64>> {
    let n = q.len();
    let alpha = alpha_of(d, rho_g);
    let mut w = vec![0.0; n];
    for i in 0..n {
        let xi = i as f64 * dx;
        let mut total = 0.0;
        for (j, &qj) in q.iter().enumerate() {
            if qj == 0.0 {
                continue;
            }
            let xj = j as f64 * dx;
            total += green(xi - xj, qj * dx, alpha, d);
        }
        w[i] = total;
    }
    Ok(w)
}

/// `Method::SpaNg`: arbitrary, non-uniform sample locations, supplied
/// as explicit `(x, q)` pairs.
pub fn solve_non_uniform(points: &[(f64, f64)], d: f64, rho_g: f64) -> FlexureResult<Vec<f64>> {
    let alpha = alpha_of(d, rho_g);
    let n = points.len();
    let mut w = vec![0.0; n];
    for (i, &(xi, _)) in points.iter().enumerate() {
        let mut total = 0.0;
        for &(xj, qj) in points {
            if qj == 0.0 {
                continue;
            }
            total += green(xi - xj, qj, alpha, d);
        }
        w[i] = total;
    }
    Ok(w)
}
