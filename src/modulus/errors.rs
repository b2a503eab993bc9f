//! Errors for elastic-modulus estimation (curve validation, window
//! truncation, and the least-squares fit).
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

/// Result alias for modulus-estimation paths.
pub type ModulusResult<T> = Result<T, ModulusError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModulusError {
    // ---- Curve validation ----
    /// Strain and stress sequences differ in length.
    LengthMismatch { strain_len: usize, stress_len: usize },

    /// The curve holds no samples.
    EmptyCurve,

    /// A strain or stress sample is NaN/±inf.
    NonFiniteSample { index: usize },

    // ---- Options ----
    /// An estimator option must be finite and strictly positive.
    InvalidOption { name: &'static str, value: f64 },

    // ---- Estimation ----
    /// The pre-yield window holds fewer samples than a line fit needs.
    ElasticWindowTooSmall { available: usize, required: usize },

    /// The least-squares solve failed (rank-deficient window).
    FitFailed { reason: &'static str },

    /// The fitted slope is NaN/±inf.
    NonFiniteModulus { value: f64 },

    /// `compute_modulus_avg` was called with no curves.
    NoCurves,
}

impl std::error::Error for ModulusError {}

impl std::fmt::Display for ModulusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModulusError::LengthMismatch { strain_len, stress_len } => {
                write!(
                    f,
                    "Strain and stress lengths differ: {strain_len} strain vs {stress_len} stress"
                )
            }
            ModulusError::EmptyCurve => {
                write!(f, "Stress-strain curve holds no samples")
            }
            ModulusError::NonFiniteSample { index } => {
                write!(f, "Curve sample at index {index} is not finite")
            }
            ModulusError::InvalidOption { name, value } => {
                write!(f, "Estimator option {name} is {value}, must be finite and > 0")
            }
            ModulusError::ElasticWindowTooSmall { available, required } => {
                write!(
                    f,
                    "Elastic fit window holds {available} samples, a line fit needs {required}: \
                     the stress threshold is crossed too early"
                )
            }
            ModulusError::FitFailed { reason } => {
                write!(f, "Least-squares line fit failed: {reason}")
            }
            ModulusError::NonFiniteModulus { value } => {
                write!(f, "Fitted elastic modulus is {value}, must be finite")
            }
            ModulusError::NoCurves => {
                write!(f, "Modulus averaging requires at least one curve")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ModulusError> for PyErr {
    fn from(err: ModulusError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
