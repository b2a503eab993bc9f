//! Errors for the iteration recorder.
//!
//! [`RecorderError`] wraps sink I/O failures; the `io::Error` text is
//! captured eagerly so the enum stays `Clone` + `PartialEq` like the other
//! error surfaces in this crate.

/// Result alias for recorder construction and dump paths.
pub type RecorderResult<T> = Result<T, RecorderError>;

#[derive(Debug, Clone, PartialEq)]
pub enum RecorderError {
    /// Opening, writing, or flushing a sink failed.
    Io { path: String, text: String },

    /// A dumped scalar is NaN/±inf and would corrupt the sink format.
    NonFiniteRecord { field: &'static str, value: f64 },
}

impl std::error::Error for RecorderError {}

impl std::fmt::Display for RecorderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecorderError::Io { path, text } => {
                write!(f, "Recorder sink {path}: {text}")
            }
            RecorderError::NonFiniteRecord { field, value } => {
                write!(f, "Recorded {field} is {value}, must be finite")
            }
        }
    }
}

impl RecorderError {
    /// Attach the sink path to an `io::Error`.
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        RecorderError::Io { path: path.display().to_string(), text: err.to_string() }
    }
}

#[cfg(feature = "python-bindings")]
impl From<RecorderError> for pyo3::PyErr {
    fn from(err: RecorderError) -> Self {
        match err {
            RecorderError::Io { .. } => pyo3::exceptions::PyIOError::new_err(err.to_string()),
            RecorderError::NonFiniteRecord { .. } => {
                pyo3::exceptions::PyValueError::new_err(err.to_string())
            }
        }
    }
}
