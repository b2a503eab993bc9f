//! Errors for constraint configuration and evaluation.
//!
//! [`ConstraintError`] flattens layout errors from the material layer and
//! adds configuration and applicability failures of its own, so optimizer
//! drivers see one error surface per evaluation call.
use crate::material::errors::ParamError;

/// Result alias for constraint configuration/evaluation paths.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    // ---- Configuration ----
    /// A bound pair must satisfy `inf <= sup` with both finite.
    InvalidBoundPair { name: &'static str, inf: f64, sup: f64 },

    /// The basic block must hold at least `sy0`, `q_inf`, and `b`.
    BasicBlockTooSmall { n_basic_param: usize },

    // ---- Evaluation ----
    /// The constraint family needs more backstress pairs than the vector
    /// carries (e.g. γ₁/γ₂ with a single pair).
    InsufficientBackstresses { name: &'static str, required: usize, found: usize },

    /// Vector length minus the basic block is odd.
    LengthParityMismatch { len: usize, n_basic_param: usize },

    /// The vector is shorter than the basic block itself.
    VectorTooShort { len: usize, n_basic_param: usize },

    /// A requested backstress index is out of range (programming error in a
    /// ratio family; surfaced rather than panicking).
    BackstressOutOfRange { index: usize, n_backstresses: usize },

    /// A parameter entry is NaN/±inf in a context that requires finiteness.
    NonFiniteEntry { index: usize, value: f64 },

    /// Record-level domain error propagated from the material layer.
    DegenerateParam { name: &'static str, value: f64 },
}

impl std::error::Error for ConstraintError {}

impl std::fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintError::InvalidBoundPair { name, inf, sup } => {
                write!(f, "Invalid bound pair {name}: inf {inf} and sup {sup} must be finite with inf <= sup")
            }
            ConstraintError::BasicBlockTooSmall { n_basic_param } => {
                write!(
                    f,
                    "Basic block of size {n_basic_param} is too small: it must hold at least \
                     sy0, q_inf, and b (3 entries)"
                )
            }
            ConstraintError::InsufficientBackstresses { name, required, found } => {
                write!(
                    f,
                    "Constraint {name} requires at least {required} backstress pairs, found {found}"
                )
            }
            ConstraintError::LengthParityMismatch { len, n_basic_param } => {
                write!(
                    f,
                    "Parameter vector of length {len} with {n_basic_param} basic parameters \
                     leaves an odd remainder; backstress (C, gamma) pairs cannot be decoded"
                )
            }
            ConstraintError::VectorTooShort { len, n_basic_param } => {
                write!(
                    f,
                    "Parameter vector of length {len} is shorter than the basic block \
                     ({n_basic_param} entries)"
                )
            }
            ConstraintError::BackstressOutOfRange { index, n_backstresses } => {
                write!(
                    f,
                    "Backstress index {index} out of range: layout holds {n_backstresses} pairs"
                )
            }
            ConstraintError::NonFiniteEntry { index, value } => {
                write!(f, "Parameter at index {index} is {value}, must be finite")
            }
            ConstraintError::DegenerateParam { name, value } => {
                write!(f, "Parameter {name} is {value}, outside the physical domain")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ConstraintError> for pyo3::PyErr {
    fn from(err: ConstraintError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

impl From<ParamError> for ConstraintError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::LengthParityMismatch { len, n_basic_param } => {
                ConstraintError::LengthParityMismatch { len, n_basic_param }
            }
            ParamError::VectorTooShort { len, n_basic_param } => {
                ConstraintError::VectorTooShort { len, n_basic_param }
            }
            ParamError::BasicBlockTooSmall { n_basic_param } => {
                ConstraintError::BasicBlockTooSmall { n_basic_param }
            }
            ParamError::BackstressOutOfRange { index, n_backstresses } => {
                ConstraintError::BackstressOutOfRange { index, n_backstresses }
            }
            ParamError::NonFiniteEntry { index, value } => {
                ConstraintError::NonFiniteEntry { index, value }
            }
            ParamError::NonPositiveParam { name, value }
            | ParamError::NegativeParam { name, value } => {
                ConstraintError::DegenerateParam { name, value }
            }
        }
    }
}
