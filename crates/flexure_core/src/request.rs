//! The public entry point: request validation and method dispatch.

use serde::{Deserialize, Serialize};

use crate::bc::BoundaryCondition;
use crate::error::{FlexureError, FlexureResult};
use crate::operator::build_matrix;
use crate::padding::{pad_for_mirror, promote_periodic_paired_with_mirror};
use crate::params::{dx4, flexural_rigidity, ElasticThickness, Rigidity};
use crate::solve::{solve_banded, solve_periodic};
use crate::spa;
use crate::stencil::build_diagonals;

/// Which of the four solution paths to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Finite-difference pentadiagonal assembly/solve: the core engine.
    Fd,
    /// Analytical point-load superposition on a uniform grid.
    Spa,
    /// Analytical point-load superposition on explicit (x, q) pairs.
    SpaNg,
    /// Spectral (FFT) path. Not implemented; always fails loudly.
    Fft,
}

/// A complete, self-contained flexure problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexureRequest {
    pub method: Method,
    pub q: Vec<f64>,
    pub dx: f64,
    pub te: ElasticThickness,
    pub e: f64,
    pub nu: f64,
    pub delta_rho: f64,
    pub g: f64,
    pub west_bc: BoundaryCondition,
    pub east_bc: BoundaryCondition,
    /// Required only for `Method::SpaNg`; ignored otherwise.
    pub x: Option<Vec<f64>>,
}

/// What a solve produces: the deflection, plus whatever the caller
/// asked for in terms of context, so a report can stand on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub w: Vec<f64>,
    pub method: Method,
    /// Time spent building the diagonals, padding the domain, and
    /// rewriting boundary rows. `None` for the analytical (`Spa`,
    /// `SpaNg`) paths, which have no comparable assembly stage.
    pub construct_time: Option<std::time::Duration>,
    /// Time spent in the linear solve (`Fd`) or the direct
    /// convolution (`Spa`, `SpaNg`).
    pub solve_time: Option<std::time::Duration>,
}

fn validate_geometry(req: &FlexureRequest) -> FlexureResult<f64> {
    let n = req.q.len();
    if n < 5 {
        return Err(FlexureError::DegenerateGeometry(format!(
            "need at least 5 grid points, got {}",
            n
        )));
    }
    if !req.dx.is_finite() || req.dx <= 0.0 {
        return Err(FlexureError::DegenerateGeometry(format!(
            "dx must be finite and positive, got {}",
            req.dx
        )));
    }
    for (name, v) in [("E", req.e), ("delta_rho", req.delta_rho), ("g", req.g)] {
        if !v.is_finite() || v <= 0.0 {
            return Err(FlexureError::DegenerateGeometry(format!(
                "{} must be finite and positive, got {}",
                name, v
            )));
        }
    }
    if !req.nu.is_finite() {
        return Err(FlexureError::DegenerateGeometry(format!(
            "nu must be finite, got {}",
            req.nu
        )));
    }
    let rho_g = req.delta_rho * req.g;
    if !(rho_g > 0.0) {
        return Err(FlexureError::DegenerateGeometry(
            "delta_rho * g must be strictly positive".to_string(),
        ));
    }
    match &req.te {
        ElasticThickness::Scalar(t) => {
            if !t.is_finite() || *t < 0.0 {
                return Err(FlexureError::DegenerateGeometry(format!(
                    "Te must be finite and non-negative, got {}",
                    t
                )));
            }
        }
        ElasticThickness::Gridded(values) => {
            if values.len() != n {
                return Err(FlexureError::DegenerateGeometry(format!(
                    "gridded Te length {} does not match q length {}",
                    values.len(),
                    n
                )));
            }
            if values.iter().any(|t| !t.is_finite() || *t < 0.0) {
                return Err(FlexureError::DegenerateGeometry(
                    "gridded Te must be finite and non-negative everywhere".to_string(),
                ));
            }
        }
    }
    Ok(rho_g)
}

/// Checks west/east compatibility: a lone `Periodic` must be paired
/// with `Periodic`, and a BC that only has a closed scalar-D form
/// rejects gridded Te up front (this is also checked lazily in
/// `crate::boundary`, but failing here gives a clearer message before
/// any padding work happens).
fn validate_boundaries(
    west: &BoundaryCondition,
    east: &BoundaryCondition,
    te: &ElasticThickness,
) -> FlexureResult<()> {
    if west.is_periodic() != east.is_periodic() && !west.is_mirror() && !east.is_mirror() {
        return Err(FlexureError::InvalidBoundary {
            west: west.label().to_string(),
            east: east.label().to_string(),
            reason: "Periodic must be paired with Periodic on the opposite edge".to_string(),
        });
    }
    for (side, bc) in [("west", west), ("east", east)] {
        let needs_scalar = matches!(
            bc,
            BoundaryCondition::Neumann | BoundaryCondition::Dirichlet0Neumann0
        );
        if needs_scalar && !te.is_scalar() {
            return Err(FlexureError::InvalidTeForBC {
                bc: format!("{} ({})", bc.label(), side),
                expected: "scalar",
                got: "gridded",
            });
        }
    }
    Ok(())
}

struct FdSolution {
    w: Vec<f64>,
    construct_time: std::time::Duration,
    solve_time: std::time::Duration,
}

fn solve_fd(req: &FlexureRequest, rho_g: f64) -> FlexureResult<FdSolution> {
    let construct_start = std::time::Instant::now();

    let (west, east) = promote_periodic_paired_with_mirror(req.west_bc.clone(), req.east_bc.clone());
    validate_boundaries(&west, &east, &req.te)?;

    let padded = pad_for_mirror(&req.q, &req.te, west, east, req.e, req.nu, rho_g, req.dx)?;
    validate_boundaries(&padded.west_bc, &padded.east_bc, &padded.te)?;

    let rigidity = flexural_rigidity(&padded.te, req.e, req.nu);
    let n = padded.q.len();
    let periodic = padded.west_bc.is_periodic() && padded.east_bc.is_periodic();

    let mut diag = build_diagonals(&rigidity, dx4(req.dx), rho_g, n, periodic);
    crate::boundary::rewrite_west(&mut diag, &padded.west_bc, &rigidity, dx4(req.dx), rho_g)?;
    crate::boundary::rewrite_east(&mut diag, &padded.east_bc, &rigidity, dx4(req.dx), rho_g)?;

    // Assembling into CSR form is solely a structural/poison check here;
    // the actual numeric solve works the band vectors directly.
    build_matrix(&diag, periodic)?;
    let construct_time = construct_start.elapsed();

    // The right-hand side is +q, not the literal -q the source this
    // was ported from forms: that source's own coefficient matrix
    // carries an equivalent overall sign flip relative to the plain
    // [1,-4,6,-4,1]*D/dx4 + drho*g stencil this crate builds, so
    // copying its "-q" step here would invert S2's expected sign
    // (positive load must give positive, downward deflection). See
    // DESIGN.md.
    let b: Vec<f64> = padded.q.clone();
    let solve_start = std::time::Instant::now();
    let w_padded = if periodic {
        solve_periodic(&diag, &b)?
    } else {
        solve_banded(&diag, &b)?
    };
    let solve_time = solve_start.elapsed();

    Ok(FdSolution {
        w: padded.unpad.apply(&w_padded),
        construct_time,
        solve_time,
    })
}

fn solve_spa(req: &FlexureRequest, rho_g: f64) -> FlexureResult<(Vec<f64>, std::time::Duration)> {
    let d = require_scalar_rigidity(&req.te, req.e, req.nu, Method::Spa)?;
    let start = std::time::Instant::now();
    let w = spa::solve_uniform(&req.q, req.dx, d, rho_g)?;
    Ok((w, start.elapsed()))
}

fn solve_spa_ng(req: &FlexureRequest, rho_g: f64) -> FlexureResult<(Vec<f64>, std::time::Duration)> {
    let d = require_scalar_rigidity(&req.te, req.e, req.nu, Method::SpaNg)?;
    let x = req.x.as_ref().ok_or_else(|| {
        FlexureError::DegenerateGeometry("SpaNg requires explicit x coordinates".to_string())
    })?;
    if x.len() != req.q.len() {
        return Err(FlexureError::DegenerateGeometry(format!(
            "x length {} does not match q length {}",
            x.len(),
            req.q.len()
        )));
    }
    let points: Vec<(f64, f64)> = x.iter().zip(req.q.iter()).map(|(&xi, &qi)| (xi, qi)).collect();
    let start = std::time::Instant::now();
    let w = spa::solve_non_uniform(&points, d, rho_g)?;
    Ok((w, start.elapsed()))
}

fn require_scalar_rigidity(te: &ElasticThickness, e: f64, nu: f64, method: Method) -> FlexureResult<f64> {
    match flexural_rigidity(te, e, nu) {
        Rigidity::Scalar(d) => Ok(d),
        Rigidity::Gridded(_) => Err(FlexureError::InvalidTeForBC {
            bc: format!("{:?}", method),
            expected: "scalar",
            got: "gridded",
        }),
    }
}

/// Validates `req` and dispatches to the method it names.
pub fn solve(req: &FlexureRequest) -> FlexureResult<SolveReport> {
    let rho_g = validate_geometry(req)?;
    let (w, construct_time, solve_time) = match req.method {
        Method::Fd => {
            let solution = solve_fd(req, rho_g)?;
            (solution.w, Some(solution.construct_time), Some(solution.solve_time))
        }
        Method::Spa => {
            let (w, t) = solve_spa(req, rho_g)?;
            (w, None, Some(t))
        }
        Method::SpaNg => {
            let (w, t) = solve_spa_ng(req, rho_g)?;
            (w, None, Some(t))
        }
        Method::Fft => {
            return Err(FlexureError::MethodNotImplemented("Fft".to_string()));
        }
    };
    Ok(SolveReport {
        w,
        method: req.method,
        construct_time,
        solve_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request(n: usize) -> FlexureRequest {
        FlexureRequest {
            method: Method::Fd,
            q: vec![0.0; n],
            dx: 10_000.0,
            te: ElasticThickness::Scalar(20_000.0),
            e: 1e11,
            nu: 0.25,
            delta_rho: 600.0,
            g: 9.8,
            west_bc: BoundaryCondition::ZeroMomentZeroShear,
            east_bc: BoundaryCondition::ZeroMomentZeroShear,
            x: None,
        }
    }

    #[test]
    fn rejects_too_few_grid_points() {
        let req = base_request(3);
        let err = solve(&req).unwrap_err();
        assert!(matches!(err, FlexureError::DegenerateGeometry(_)));
    }

    #[test]
    fn rejects_lone_periodic() {
        let mut req = base_request(11);
        req.west_bc = BoundaryCondition::Periodic;
        let err = solve(&req).unwrap_err();
        assert!(matches!(err, FlexureError::InvalidBoundary { .. }));
    }

    #[test]
    fn fft_is_not_implemented() {
        let mut req = base_request(11);
        req.method = Method::Fft;
        let err = solve(&req).unwrap_err();
        assert!(matches!(err, FlexureError::MethodNotImplemented(_)));
    }

    #[test]
    fn zero_load_gives_zero_deflection() {
        let req = base_request(21);
        let report = solve(&req).unwrap();
        for &w in &report.w {
            assert!(w.abs() < 1e-9);
        }
    }

    #[test]
    fn spa_ng_requires_x() {
        let mut req = base_request(11);
        req.method = Method::SpaNg;
        let err = solve(&req).unwrap_err();
        assert!(matches!(err, FlexureError::DegenerateGeometry(_)));
    }

    // ---- spec.md 8: literal boundary scenarios (E=1e11, nu=0.25,
    // delta_rho=600, g=9.8, Te=20000, dx=10000, N=101) -----------------

    fn literal_request(n: usize) -> FlexureRequest {
        let mut req = base_request(n);
        req.q = vec![0.0; n];
        req
    }

    #[test]
    fn s1_zero_load_gives_zero_deflection_at_n101() {
        let req = literal_request(101);
        let report = solve(&req).unwrap();
        for &w in &report.w {
            assert!(w.abs() < 1e-6, "expected ~0, got {}", w);
        }
    }

    #[test]
    fn s2_uniform_load_periodic_gives_constant_deflection() {
        let mut req = literal_request(101);
        req.q = vec![1e8; 101];
        req.west_bc = BoundaryCondition::Periodic;
        req.east_bc = BoundaryCondition::Periodic;
        let report = solve(&req).unwrap();
        let expected = 1e8 / (req.delta_rho * req.g);
        for &w in &report.w {
            assert_relative_eq(w, expected, 1e-6);
        }
    }

    #[test]
    fn s3_point_load_0m0s_is_symmetric_and_decays() {
        let mut req = literal_request(101);
        req.q[50] = 1e9 / req.dx;
        req.west_bc = BoundaryCondition::ZeroMomentZeroShear;
        req.east_bc = BoundaryCondition::ZeroMomentZeroShear;
        let report = solve(&req).unwrap();
        let w = &report.w;
        for k in 1..30 {
            assert_relative_eq(w[50 - k], w[50 + k], 1e-8);
        }
        // Monotonic only in the immediate near field: the analytical
        // kernel's exp(-u)(cos u + sin u) envelope this discretizes
        // changes sign around u = 3*pi/4 (a flexural "forebulge"), so
        // checking the whole half-domain would be physically wrong.
        let near_field = 15;
        for i in (50 - near_field)..49 {
            assert!(w[i] <= w[i + 1] + 1e-9, "expected monotonic rise into the peak at i={}", i);
        }
        for i in 51..(50 + near_field) {
            assert!(w[i] >= w[i + 1] - 1e-9, "expected monotonic decay past the peak at i={}", i);
        }
    }

    #[test]
    fn s4_symmetric_matches_doubled_0m0s_by_reflection() {
        let n = 21usize;
        let q0 = 1e5;
        let mut original = literal_request(n);
        original.q[0] = q0;
        original.west_bc = BoundaryCondition::Symmetric;
        original.east_bc = BoundaryCondition::ZeroMomentZeroShear;
        let original_report = solve(&original).unwrap();

        let doubled_n = 2 * n - 1;
        let center = n - 1;
        let mut doubled = literal_request(doubled_n);
        doubled.q[center] = 2.0 * q0;
        doubled.west_bc = BoundaryCondition::ZeroMomentZeroShear;
        doubled.east_bc = BoundaryCondition::ZeroMomentZeroShear;
        let doubled_report = solve(&doubled).unwrap();

        for i in 0..n {
            assert_relative_eq(original_report.w[i], doubled_report.w[center + i], 1e-6);
        }
    }

    #[test]
    fn s5_mirror_matches_manual_dirichlet_zero_padding() {
        use crate::padding::max_flexural_wavelength_ncells;

        // n_pad works out to 53 cells for these physical constants, so a
        // 101-cell domain (the baseline N from the boundary-scenario
        // block above) would fall in Mirror/Mirror's "glom onto a single
        // periodic domain" regime (n_pad <= N <= 2*n_pad) rather than the
        // truncate-and-apply-Dirichlet regime this scenario exercises.
        // Use a longer domain so the load sits more than n_pad cells from
        // either edge *and* the domain exceeds 2*n_pad.
        let n = 141;
        let center = 70;
        let te_value = 20_000.0;
        let mut req = literal_request(n);
        req.q[center] = 1e9 / req.dx;
        req.te = ElasticThickness::Gridded(vec![te_value; n]);
        req.west_bc = BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet);
        req.east_bc = BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet);
        let mirror_report = solve(&req).unwrap();

        let rigidity = flexural_rigidity(&req.te, req.e, req.nu);
        let rho_g = req.delta_rho * req.g;
        let n_pad = max_flexural_wavelength_ncells(&rigidity, rho_g, req.dx);
        assert!(n > 2 * n_pad, "test setup must stay outside the periodic-glom regime");

        let mut manual = literal_request(n + 2 * n_pad);
        manual.te = ElasticThickness::Gridded(vec![te_value; n + 2 * n_pad]);
        manual.q[n_pad + center] = 1e9 / req.dx;
        manual.west_bc = BoundaryCondition::Dirichlet;
        manual.east_bc = BoundaryCondition::Dirichlet;
        let manual_report = solve(&manual).unwrap();

        for i in 0..n {
            assert_relative_eq(mirror_report.w[i], manual_report.w[n_pad + i], 1e-6);
        }
    }

    #[test]
    fn s6_gridded_uniform_te_matches_scalar_te() {
        let mut scalar_req = literal_request(101);
        scalar_req.q[50] = 1e9 / scalar_req.dx;
        scalar_req.west_bc = BoundaryCondition::ZeroMomentZeroShear;
        scalar_req.east_bc = BoundaryCondition::ZeroMomentZeroShear;
        let scalar_report = solve(&scalar_req).unwrap();

        let mut gridded_req = scalar_req.clone();
        gridded_req.te = crate::params::ElasticThickness::Gridded(vec![20_000.0; 101]);
        let gridded_report = solve(&gridded_req).unwrap();

        for (a, b) in scalar_report.w.iter().zip(gridded_report.w.iter()) {
            assert_relative_eq(*a, *b, 1e-6);
        }
    }

    // ---- spec.md 8: invariants -----------------------------------------

    #[test]
    fn i4_non_singular_for_every_supported_bc() {
        let combos = [
            (BoundaryCondition::Dirichlet, BoundaryCondition::Dirichlet),
            (BoundaryCondition::ZeroMomentZeroShear, BoundaryCondition::ZeroMomentZeroShear),
            (BoundaryCondition::Symmetric, BoundaryCondition::Symmetric),
            (BoundaryCondition::Periodic, BoundaryCondition::Periodic),
            (
                BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet),
                BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet),
            ),
        ];
        for (west, east) in combos {
            let mut req = literal_request(21);
            req.q[10] = 1e5;
            // Gridded (rather than scalar) Te keeps a lone Mirror's
            // glom-regime resolution on the Dirichlet branch instead
            // of the unspecified Stewart1 one (see DESIGN.md).
            req.te = crate::params::ElasticThickness::Gridded(vec![20_000.0; 21]);
            req.west_bc = west.clone();
            req.east_bc = east.clone();
            let result = solve(&req);
            assert!(result.is_ok(), "expected a non-singular solve for {:?}/{:?}", west, east);
        }
    }

    #[test]
    fn r1_mirror_round_trips_original_length() {
        let mut req = literal_request(37);
        req.q[18] = 5e4;
        // Gridded Te routes the glom-regime Mirror resolution onto the
        // Dirichlet branch rather than the unspecified Stewart1 one.
        req.te = crate::params::ElasticThickness::Gridded(vec![20_000.0; 37]);
        req.west_bc = BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet);
        req.east_bc = BoundaryCondition::mirror_inner(BoundaryCondition::Dirichlet);
        let report = solve(&req).unwrap();
        assert_eq!(report.w.len(), 37);
    }

    #[test]
    fn a1_fd_converges_toward_spa_for_a_well_resolved_point_load() {
        let dx = 2_000.0;
        let n = 401;
        let mut fd_req = literal_request(n);
        let center = n / 2;
        fd_req.dx = dx;
        fd_req.q[center] = 1e9 / dx;
        fd_req.west_bc = BoundaryCondition::ZeroMomentZeroShear;
        fd_req.east_bc = BoundaryCondition::ZeroMomentZeroShear;
        let fd_report = solve(&fd_req).unwrap();

        let mut spa_req = fd_req.clone();
        spa_req.method = Method::Spa;
        let spa_report = solve(&spa_req).unwrap();

        // Compare only the well-resolved core, away from the
        // decay-approximating boundary.
        let lo = center - 50;
        let hi = center + 50;
        let mut num = 0.0;
        let mut den = 0.0;
        for i in lo..=hi {
            let diff = fd_report.w[i] - spa_report.w[i];
            num += diff * diff;
            den += spa_report.w[i] * spa_report.w[i];
        }
        let relative_l2 = (num / den).sqrt();
        assert!(relative_l2 < 0.1, "FD/SPA relative L2 mismatch: {}", relative_l2);
    }

    fn assert_relative_eq(a: f64, b: f64, max_relative: f64) {
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!(
            (a - b).abs() <= max_relative * scale,
            "expected {} ~= {} (max_relative {})",
            a,
            b,
            max_relative
        );
    }
}
