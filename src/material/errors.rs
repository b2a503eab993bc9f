//! Errors for Voce-Chaboche parameter handling (vector layout, decoding,
//! and physical-domain validation).
//!
//! This module defines [`ParamError`], used by the layout and parameter
//! record types in [`crate::material`]. It implements `Display`/`Error` and
//! converts to `PyErr` for PyO3 when the `python-bindings` feature is on.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - The flat vector layout is `[basic block | C₁, γ₁, C₂, γ₂, …]` with the
//!   basic block of length `n_basic_param`.
//! - Physical-domain checks (strict positivity of `sy0`, `b`, `γ_k`) apply
//!   only to the validated record type, never to raw optimizer iterates.
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for parameter-vector layout and record validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    // ---- Layout ----
    /// Vector length minus the basic block is odd, so the backstress pairs
    /// cannot be decoded.
    LengthParityMismatch { len: usize, n_basic_param: usize },

    /// The vector is shorter than the basic block itself.
    VectorTooShort { len: usize, n_basic_param: usize },

    /// The basic block must hold at least `sy0`, `q_inf`, and `b`.
    BasicBlockTooSmall { n_basic_param: usize },

    /// A requested backstress index is out of range for the decoded layout.
    BackstressOutOfRange { index: usize, n_backstresses: usize },

    // ---- Record validation ----
    /// A parameter entry is NaN/±inf.
    NonFiniteEntry { index: usize, value: f64 },

    /// A named parameter must be finite and strictly positive.
    NonPositiveParam { name: &'static str, value: f64 },

    /// A named parameter must be finite and non-negative.
    NegativeParam { name: &'static str, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::LengthParityMismatch { len, n_basic_param } => {
                write!(
                    f,
                    "Parameter vector of length {len} with {n_basic_param} basic parameters \
                     leaves an odd remainder; backstress (C, gamma) pairs cannot be decoded"
                )
            }
            ParamError::VectorTooShort { len, n_basic_param } => {
                write!(
                    f,
                    "Parameter vector of length {len} is shorter than the basic block \
                     ({n_basic_param} entries)"
                )
            }
            ParamError::BasicBlockTooSmall { n_basic_param } => {
                write!(
                    f,
                    "Basic block of size {n_basic_param} is too small: it must hold at least \
                     sy0, q_inf, and b (3 entries)"
                )
            }
            ParamError::BackstressOutOfRange { index, n_backstresses } => {
                write!(
                    f,
                    "Backstress index {index} out of range: layout holds {n_backstresses} pairs"
                )
            }
            ParamError::NonFiniteEntry { index, value } => {
                write!(f, "Parameter at index {index} is {value}, must be finite")
            }
            ParamError::NonPositiveParam { name, value } => {
                write!(f, "Parameter {name} is {value}, must be finite and > 0")
            }
            ParamError::NegativeParam { name, value } => {
                write!(f, "Parameter {name} is {value}, must be finite and >= 0")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
