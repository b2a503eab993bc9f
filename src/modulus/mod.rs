//! modulus — elastic-modulus estimation from stress-strain curves.
//!
//! Purpose
//! -------
//! Derive Young's modulus from a raw stress-strain curve by isolating the
//! elastic (pre-yield) segment with a nominal-yield threshold heuristic and
//! fitting its slope by ordinary least squares. The modulus runs once per
//! dataset, upstream of calibration, and is usually held fixed rather than
//! fitted.
//!
//! Key behaviors
//! -------------
//! - Truncate the curve at the first sample whose absolute stress exceeds
//!   `yield_fraction * nominal_yield` (the sample before it ends the
//!   window); a curve that never crosses the threshold is used whole except
//!   for its final sample.
//! - Fit a first-degree polynomial over the window via an SVD least-squares
//!   solve and return the slope coefficient.
//! - Average per-curve moduli over a collection with no weighting by curve
//!   length or quality.
//!
//! Invariants & assumptions
//! ------------------------
//! - Curves are validated at construction: equal-length, non-empty, finite.
//!   No monotonicity or duplicate-strain invariant is assumed.
//! - A window of fewer than two samples is an explicit estimation failure
//!   ([`ModulusError::ElasticWindowTooSmall`]), never a degenerate fit.
//!
//! Testing notes
//! -------------
//! - Unit tests fit synthetic curves with a known linear region and a
//!   nonlinear tail, exercise the threshold-at-first-sample failure, and
//!   check the unweighted average.

pub mod errors;

pub use self::errors::{ModulusError, ModulusResult};

use nalgebra::{DMatrix, DVector};
use ndarray::Array1;

/// One experiment's stress-strain record.
///
/// Invariants (validated by [`StressStrainCurve::new`]): equal lengths,
/// at least one sample, all samples finite.
#[derive(Debug, Clone, PartialEq)]
pub struct StressStrainCurve {
    strain: Array1<f64>,
    stress: Array1<f64>,
}

impl StressStrainCurve {
    /// Create a validated curve from true-strain and true-stress sequences.
    ///
    /// # Errors
    /// - [`ModulusError::LengthMismatch`] if the sequences differ in length.
    /// - [`ModulusError::EmptyCurve`] if they are empty.
    /// - [`ModulusError::NonFiniteSample`] at the first NaN/±inf sample.
    pub fn new(strain: Array1<f64>, stress: Array1<f64>) -> ModulusResult<Self> {
        if strain.len() != stress.len() {
            return Err(ModulusError::LengthMismatch {
                strain_len: strain.len(),
                stress_len: stress.len(),
            });
        }
        if strain.is_empty() {
            return Err(ModulusError::EmptyCurve);
        }
        for (index, (&e, &s)) in strain.iter().zip(stress.iter()).enumerate() {
            if !e.is_finite() || !s.is_finite() {
                return Err(ModulusError::NonFiniteSample { index });
            }
        }
        Ok(StressStrainCurve { strain, stress })
    }

    /// True-strain samples, in acquisition order.
    pub fn strain(&self) -> &Array1<f64> {
        &self.strain
    }

    /// True-stress samples, in acquisition order.
    pub fn stress(&self) -> &Array1<f64> {
        &self.stress
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.strain.len()
    }

    /// Always false for a constructed curve; kept for `len`/`is_empty`
    /// pairing conventions.
    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }
}

/// Options of the linear-region heuristic.
///
/// The elastic window ends just before the first sample whose absolute
/// stress exceeds `yield_fraction * nominal_yield`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulusOptions {
    /// Fraction of the nominal yield stress bounding the elastic region.
    pub yield_fraction: f64,
    /// Nominal yield stress of the material, in the stress units of the
    /// curve (conventionally MPa; 345 is the S355 structural-steel nominal).
    pub nominal_yield: f64,
}

impl ModulusOptions {
    /// Create validated options.
    ///
    /// # Errors
    /// - [`ModulusError::InvalidOption`] if either value is non-finite or
    ///   ≤ 0.
    pub fn new(yield_fraction: f64, nominal_yield: f64) -> ModulusResult<Self> {
        if !yield_fraction.is_finite() || yield_fraction <= 0.0 {
            return Err(ModulusError::InvalidOption {
                name: "yield_fraction",
                value: yield_fraction,
            });
        }
        if !nominal_yield.is_finite() || nominal_yield <= 0.0 {
            return Err(ModulusError::InvalidOption {
                name: "nominal_yield",
                value: nominal_yield,
            });
        }
        Ok(ModulusOptions { yield_fraction, nominal_yield })
    }
}

impl Default for ModulusOptions {
    /// Conventional defaults: two-thirds of the 345 MPa nominal yield.
    fn default() -> Self {
        ModulusOptions { yield_fraction: 0.66, nominal_yield: 345.0 }
    }
}

/// Estimate the elastic modulus of one curve.
///
/// Scans `|stress|` in index order; the first index `i` exceeding
/// `yield_fraction * nominal_yield` sets the exclusive window end to
/// `i − 1`. A curve that never crosses the threshold uses `len − 1`, i.e.
/// everything but the final sample. The slope of an ordinary least-squares
/// line over the window is returned.
///
/// # Errors
/// - [`ModulusError::ElasticWindowTooSmall`] when the window holds fewer
///   than two samples (threshold crossed at index 0, 1, or 2).
/// - [`ModulusError::FitFailed`] when the least-squares solve breaks down.
/// - [`ModulusError::NonFiniteModulus`] when the fitted slope is not finite
///   (e.g. a window of identical strains).
pub fn compute_modulus(curve: &StressStrainCurve, options: &ModulusOptions) -> ModulusResult<f64> {
    let threshold = options.yield_fraction * options.nominal_yield;
    let mut window_end = curve.len() as isize - 1;
    for (i, &s) in curve.stress().iter().enumerate() {
        if s.abs() > threshold {
            window_end = i as isize - 1;
            break;
        }
    }
    if window_end < 2 {
        return Err(ModulusError::ElasticWindowTooSmall {
            available: window_end.max(0) as usize,
            required: 2,
        });
    }
    let window = window_end as usize;

    // First-degree polynomial fit: [strain, 1] · [slope, intercept] = stress.
    let mut design = DMatrix::<f64>::zeros(window, 2);
    let mut rhs = DVector::<f64>::zeros(window);
    for i in 0..window {
        design[(i, 0)] = curve.strain()[i];
        design[(i, 1)] = 1.0;
        rhs[i] = curve.stress()[i];
    }
    let svd = design.svd(true, true);
    let coeffs =
        svd.solve(&rhs, f64::EPSILON.sqrt()).map_err(|reason| ModulusError::FitFailed { reason })?;
    let slope = coeffs[0];
    if !slope.is_finite() {
        return Err(ModulusError::NonFiniteModulus { value: slope });
    }
    Ok(slope)
}

/// Arithmetic mean of per-curve moduli over a collection of experiments.
///
/// No weighting by curve length or quality is applied. Any per-curve
/// estimation failure is propagated.
///
/// # Errors
/// - [`ModulusError::NoCurves`] when `curves` is empty.
/// - Any error from [`compute_modulus`] on an individual curve.
pub fn compute_modulus_avg(
    curves: &[StressStrainCurve], options: &ModulusOptions,
) -> ModulusResult<f64> {
    if curves.is_empty() {
        return Err(ModulusError::NoCurves);
    }
    let mut sum = 0.0;
    for curve in curves {
        sum += compute_modulus(curve, options)?;
    }
    Ok(sum / curves.len() as f64)
}
