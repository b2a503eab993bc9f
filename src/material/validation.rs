//! Parameter validation helpers — reusable checks for Voce-Chaboche records.
//!
//! Purpose
//! -------
//! Centralize the small validation routines used by the parameter record
//! constructors in [`crate::material::params`], so physical-domain invariants
//! (finiteness, strict positivity of denominators) are stated once and fail
//! fast with structured errors.
//!
//! Conventions
//! -----------
//! - Validation functions return [`ParamResult`] and never panic on invalid
//!   *inputs*; panics are reserved for programming errors elsewhere.
//! - Raw optimizer iterates are NOT validated against the physical domain;
//!   an optimizer may probe infeasible points. Only finiteness of full
//!   vectors and the positivity of named record fields are enforced here.
use crate::material::errors::{ParamError, ParamResult};
use ndarray::ArrayView1;

/// Validate that every entry of `x` is finite.
///
/// # Errors
/// - [`ParamError::NonFiniteEntry`] with the first offending index and value.
pub fn validate_finite_vector(x: ArrayView1<f64>) -> ParamResult<()> {
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteEntry { index, value });
        }
    }
    Ok(())
}

/// Validate a named parameter that must be finite and strictly positive
/// (`sy0`, `b`, and every `γ_k` appear as denominators downstream).
///
/// # Errors
/// - [`ParamError::NonPositiveParam`] if `value` is NaN, ±∞, or ≤ 0.
pub fn validate_strictly_positive(name: &'static str, value: f64) -> ParamResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ParamError::NonPositiveParam { name, value });
    }
    Ok(value)
}

/// Validate a named parameter that must be finite and non-negative
/// (`q_inf` and every `C_k` contribute saturation stress but never divide).
///
/// # Errors
/// - [`ParamError::NegativeParam`] if `value` is NaN, ±∞, or < 0.
pub fn validate_non_negative(name: &'static str, value: f64) -> ParamResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ParamError::NegativeParam { name, value });
    }
    Ok(value)
}
