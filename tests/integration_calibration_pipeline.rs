//! Integration tests for the Voce-Chaboche calibration support pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end calibration support path: from a raw
//!   stress-strain curve through elastic-modulus estimation, validated
//!   parameter records, constraint evaluation with exact derivatives, and
//!   iteration recording.
//! - Exercise realistic parameter regimes (structural-steel magnitudes,
//!   two-backstress models) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `material`:
//!   - `VcParams` flat-vector round trip and layout decoding.
//! - `constraints`:
//!   - The full ten-constraint standard set evaluated at a feasible point.
//!   - Analytic gradients cross-checked against central finite differences.
//!   - Hessian symmetry through the standard-form wrappers.
//! - `modulus`:
//!   - Modulus recovery from synthetic curves and the collection average.
//! - `recorder`:
//!   - Sink truncation, header, and per-iteration line structure over a
//!     simulated optimizer run.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (layout
//!   validation, bound pairs, error taxonomies) — these are covered by
//!   unit tests.
//! - Python bindings — those are expected to be tested at a higher
//!   integration or system level.
//! - The optimization solver itself; iterates here are scripted.
use finitediff::FiniteDiff;
use ndarray::{Array1, array};
use vc_calibration::{
    constraints::{
        bounded::standard_constraint_set,
        constants::{BoundPair, ConstraintConstants, Variables},
    },
    material::params::VcParams,
    modulus::{ModulusOptions, StressStrainCurve, compute_modulus, compute_modulus_avg},
    recorder::{IterationRecorder, IterationState},
};

/// Purpose
/// -------
/// Provide the run constants used throughout the pipeline tests, with
/// bound pairs wide enough that the scripted trial points stay feasible.
///
/// Configuration
/// -------------
/// - `n_basic_param = 4` (elastic modulus leads the basic block).
/// - Saturation-to-yield ratio in [1.1, 2.0].
/// - Isotropic share in [0.2, 0.8].
/// - γ₁/b in [2, 25], γ₁/γ₂ in [1.5, 10], kinematic balance in [0.5, 4].
///
/// Invariants
/// ----------
/// - Panics if any bound pair is rejected; this is treated as a test-time
///   configuration error, not a behavior under test.
fn pipeline_constants() -> ConstraintConstants {
    ConstraintConstants::new(
        4,
        BoundPair::new("yield_ratio", 1.1, 2.0).expect("finite ordered bounds"),
        BoundPair::new("iso_share", 0.2, 0.8).expect("finite ordered bounds"),
        BoundPair::new("gamma_rate", 2.0, 25.0).expect("finite ordered bounds"),
        BoundPair::new("gamma_pair", 1.5, 10.0).expect("finite ordered bounds"),
        BoundPair::new("kin_balance", 0.5, 4.0).expect("finite ordered bounds"),
    )
    .expect("n_basic_param >= 3")
}

/// Purpose
/// -------
/// Construct a synthetic stress-strain curve that is exactly linear below
/// the estimator threshold and hardens nonlinearly beyond it.
///
/// Parameters
/// ----------
/// - `modulus`: True elastic slope, in stress units per unit strain.
/// - `yield_stress`: Stress at which the curve leaves the linear branch.
/// - `n_elastic`: Number of samples on the linear branch; should be large
///   enough that the truncated window still holds several points.
///
/// Returns
/// -------
/// - A validated `StressStrainCurve` whose pre-threshold slope is exactly
///   `modulus`.
fn synthetic_curve(modulus: f64, yield_stress: f64, n_elastic: usize) -> StressStrainCurve {
    let e_yield = yield_stress / modulus;
    let mut strain = Vec::with_capacity(n_elastic + 20);
    let mut stress = Vec::with_capacity(n_elastic + 20);
    for i in 0..n_elastic {
        let e = e_yield * i as f64 / n_elastic as f64;
        strain.push(e);
        stress.push(modulus * e);
    }
    for i in 0..20 {
        strain.push(e_yield + 0.001 * (i + 1) as f64);
        stress.push(yield_stress + 8.0 * ((i + 1) as f64).sqrt());
    }
    StressStrainCurve::new(Array1::from(strain), Array1::from(stress))
        .expect("synthetic curve is finite, non-empty, equal-length")
}

/// Scripted optimizer iterates: a feasible two-backstress starting point
/// and two perturbed successors, all decodable under `n_basic_param = 4`.
fn scripted_iterates() -> Vec<Array1<f64>> {
    vec![
        array![193_000.0, 300.0, 100.0, 5.0, 1_000.0, 50.0, 500.0, 20.0],
        array![193_000.0, 310.0, 95.0, 4.5, 950.0, 45.0, 480.0, 18.0],
        array![193_000.0, 318.0, 92.0, 4.2, 920.0, 42.0, 470.0, 17.0],
    ]
}

#[test]
// Purpose
// -------
// Exercise the full calibration support path on one dataset: estimate the
// modulus from synthetic curves, decode the starting point into a
// validated record, evaluate every standard-form constraint at each
// scripted iterate, and record the run.
//
// Given
// -----
// - Two synthetic curves with true modulus 193000 (MPa units).
// - Three scripted iterates of an 8-entry two-backstress vector.
// - The pipeline constants with wide, feasible bound pairs.
//
// Expect
// ------
// - The averaged modulus matches 193000 to 1e-6 relative.
// - `VcParams` round-trips the starting vector exactly.
// - All ten constraints are finite and satisfied (≤ 0) at every iterate.
// - The recorder leaves a header plus three scalar lines and three
//   parameter lines of nine fields (prepended modulus + eight parameters).
fn pipeline_estimates_modulus_checks_constraints_and_records() {
    // Arrange: modulus from data.
    let curves = vec![synthetic_curve(193_000.0, 345.0, 60), synthetic_curve(193_000.0, 350.0, 80)];
    let emod = compute_modulus_avg(&curves, &ModulusOptions::default())
        .expect("synthetic curves have a clean linear region");
    assert!((emod - 193_000.0).abs() / 193_000.0 < 1e-6);

    // Arrange: validated starting record.
    let iterates = scripted_iterates();
    let params = VcParams::from_x(iterates[0].view(), 4).expect("feasible starting point decodes");
    assert_eq!(params.to_x(), iterates[0]);

    let constants = pipeline_constants();
    let vars = Variables::new();
    let set = standard_constraint_set();

    // Arrange: recorder over temp sinks.
    let dir = std::env::temp_dir();
    let param_path = dir.join(format!("vc_pipeline_{}.prm", std::process::id()));
    let scalar_path = dir.join(format!("vc_pipeline_{}.fun", std::process::id()));
    let mut recorder = IterationRecorder::new(&param_path, &scalar_path, Some(emod))
        .expect("temp sinks are writable");

    // Act: walk the scripted iterates as an optimizer callback would.
    for (iteration, x) in iterates.iter().enumerate() {
        let mut worst = f64::NEG_INFINITY;
        for constraint in &set {
            let value = constraint
                .value(x.view(), &constants, &vars)
                .expect("two-backstress vector satisfies every family's applicability");
            assert!(value.is_finite(), "{} must be finite", constraint.name());
            assert!(value <= 0.0, "{} must be satisfied at a feasible iterate", constraint.name());
            worst = worst.max(value);
        }
        let state = IterationState {
            iteration,
            objective: 10.0 / (iteration + 1) as f64,
            optimality: worst.abs(),
        };
        recorder.dump(x.view(), &state).expect("dump to temp sinks succeeds");
    }
    drop(recorder);

    // Assert: recorded structure.
    let scalar = std::fs::read_to_string(&scalar_path).expect("scalar sink readable");
    let scalar_lines: Vec<&str> = scalar.lines().collect();
    assert_eq!(scalar_lines.len(), 4);
    assert_eq!(scalar_lines[0], "iteration, function, norm_grad_Lagr");
    for line in &scalar_lines[1..] {
        assert_eq!(line.split(", ").count(), 3);
    }

    let recorded = std::fs::read_to_string(&param_path).expect("parameter sink readable");
    let param_lines: Vec<&str> = recorded.lines().collect();
    assert_eq!(param_lines.len(), 3);
    for line in &param_lines {
        let fields: Vec<f64> =
            line.split(' ').map(|s| s.parse().expect("scientific-notation field")).collect();
        assert_eq!(fields.len(), 9);
        assert!((fields[0] - emod).abs() / emod < 1e-6);
    }

    let _ = std::fs::remove_file(&param_path);
    let _ = std::fs::remove_file(&scalar_path);
}

#[test]
// Purpose
// -------
// Cross-check every standard-form constraint's analytic gradient against
// a central finite difference of its value, and confirm Hessian symmetry,
// at two distinct feasible points.
//
// Given
// -----
// - The scripted iterates and pipeline constants.
//
// Expect
// ------
// - Max absolute gradient deviation below 1e-5 relative to the gradient
//   scale at each point.
// - Every Hessian bitwise symmetric.
fn constraint_derivatives_match_finite_differences_in_pipeline() {
    let constants = pipeline_constants();
    let vars = Variables::new();
    let set = standard_constraint_set();

    for x in scripted_iterates().iter().take(2) {
        for constraint in &set {
            let value_fn = |x1: &Array1<f64>| {
                constraint
                    .value(x1.view(), &constants, &vars)
                    .expect("probe points stay decodable")
            };
            let numeric = x.central_diff(&value_fn);
            let analytic =
                constraint.gradient(x.view(), &constants, &vars).expect("gradient evaluates");
            let scale = analytic.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
            for (a, n) in analytic.iter().zip(numeric.iter()) {
                assert!(
                    (a - n).abs() <= 1e-5 * scale,
                    "{}: analytic {a} vs numeric {n}",
                    constraint.name()
                );
            }

            let hess = constraint.hessian(x.view(), &constants, &vars).expect("hessian evaluates");
            assert_eq!(hess, hess.t().to_owned(), "{} Hessian must be symmetric", constraint.name());
        }
    }
}

#[test]
// Purpose
// -------
// Verify the estimated modulus feeds back into the parameter pipeline:
// the per-curve and averaged estimates agree on identical curves, and a
// record built with the estimate round-trips through the flat vector.
//
// Given
// -----
// - Two identical synthetic curves with true modulus 200000.
//
// Expect
// ------
// - Per-curve and averaged estimates agree to 1e-12 relative.
// - A `VcParams` with the estimate as leading entry reproduces it through
//   `to_x`.
fn modulus_estimate_flows_into_parameter_vector() {
    let curve = synthetic_curve(200_000.0, 355.0, 50);
    let options = ModulusOptions::default();
    let single = compute_modulus(&curve, &options).expect("clean linear region");
    let avg = compute_modulus_avg(&[curve.clone(), curve], &options).expect("non-empty collection");
    assert!((single - avg).abs() / single < 1e-12);

    let x = array![single, 355.0, 110.0, 6.0, 1_100.0, 55.0, 520.0, 22.0];
    let params = VcParams::from_x(x.view(), 4).expect("valid record");
    assert_eq!(params.to_x()[0], single);
}
