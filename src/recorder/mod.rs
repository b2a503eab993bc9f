//! recorder — persistence of optimizer iteration history.
//!
//! Purpose
//! -------
//! Record the progress of a constrained-optimization run as it happens: one
//! sink receives the parameter vector per iteration, the other a scalar
//! summary line (iteration index, objective, optimality measure). Solver
//! drivers call [`IterationRecorder::dump`] from their per-iteration
//! callback.
//!
//! Key behaviors
//! -------------
//! - Construction truncates both sinks and writes the column header
//!   `iteration, function, norm_grad_Lagr` to the scalar sink, so each run
//!   starts from a clean history.
//! - When a fixed elastic modulus is supplied, it is prepended to every
//!   dumped parameter line; downstream plotting reads one uniform column
//!   layout whether or not the modulus was fitted.
//! - Both sinks are flushed after every dump. A run killed mid-optimization
//!   leaves complete lines behind.
//!
//! Invariants & assumptions
//! ------------------------
//! - Append-only: records are never rewritten once dumped.
//! - One recorder per optimizer run; callbacks arrive in iteration order on
//!   a single thread.
//!
//! Conventions
//! -----------
//! - Parameter lines are space-separated `{:.6e}` values; scalar lines are
//!   `{iteration}, {objective:.4e}, {optimality:.4e}`.

pub mod errors;

pub use self::errors::{RecorderError, RecorderResult};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::ArrayView1;

/// Per-iteration solver summary passed to [`IterationRecorder::dump`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationState {
    /// Iteration counter reported by the solver.
    pub iteration: usize,
    /// Objective value at the current iterate.
    pub objective: f64,
    /// Optimality measure, conventionally the norm of the Lagrangian
    /// gradient.
    pub optimality: f64,
}

/// Writes optimizer progress to a parameter sink and a scalar sink.
#[derive(Debug)]
pub struct IterationRecorder {
    param_path: PathBuf,
    scalar_path: PathBuf,
    param_sink: BufWriter<File>,
    scalar_sink: BufWriter<File>,
    emod: Option<f64>,
}

impl IterationRecorder {
    /// Open (truncating) both sinks and write the scalar-sink header.
    ///
    /// `emod` is an elastic modulus to prepend to every dumped parameter
    /// line, for runs where the modulus is held fixed instead of fitted.
    ///
    /// # Errors
    /// - [`RecorderError::Io`] if either sink cannot be created or the
    ///   header cannot be written.
    pub fn new(
        param_sink_path: &Path, scalar_sink_path: &Path, emod: Option<f64>,
    ) -> RecorderResult<Self> {
        let param_sink = BufWriter::new(
            File::create(param_sink_path).map_err(|e| RecorderError::io(param_sink_path, e))?,
        );
        let mut scalar_sink = BufWriter::new(
            File::create(scalar_sink_path).map_err(|e| RecorderError::io(scalar_sink_path, e))?,
        );
        scalar_sink
            .write_all(b"iteration, function, norm_grad_Lagr\n")
            .and_then(|_| scalar_sink.flush())
            .map_err(|e| RecorderError::io(scalar_sink_path, e))?;
        Ok(IterationRecorder {
            param_path: param_sink_path.to_path_buf(),
            scalar_path: scalar_sink_path.to_path_buf(),
            param_sink,
            scalar_sink,
            emod,
        })
    }

    /// Append one iteration to both sinks and flush them.
    ///
    /// # Errors
    /// - [`RecorderError::NonFiniteRecord`] if the objective or optimality
    ///   is NaN/±inf.
    /// - [`RecorderError::Io`] on any sink write failure.
    pub fn dump(&mut self, x: ArrayView1<f64>, state: &IterationState) -> RecorderResult<()> {
        if !state.objective.is_finite() {
            return Err(RecorderError::NonFiniteRecord {
                field: "objective",
                value: state.objective,
            });
        }
        if !state.optimality.is_finite() {
            return Err(RecorderError::NonFiniteRecord {
                field: "optimality",
                value: state.optimality,
            });
        }

        let mut line = String::new();
        if let Some(emod) = self.emod {
            line.push_str(&format!("{emod:.6e}"));
        }
        for &value in x.iter() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&format!("{value:.6e}"));
        }
        line.push('\n');
        self.param_sink
            .write_all(line.as_bytes())
            .and_then(|_| self.param_sink.flush())
            .map_err(|e| RecorderError::io(&self.param_path, e))?;

        let scalar_line =
            format!("{}, {:.4e}, {:.4e}\n", state.iteration, state.objective, state.optimality);
        self.scalar_sink
            .write_all(scalar_line.as_bytes())
            .and_then(|_| self.scalar_sink.flush())
            .map_err(|e| RecorderError::io(&self.scalar_path, e))?;
        Ok(())
    }

    /// Elastic modulus prepended to parameter lines, if any.
    pub fn emod(&self) -> Option<f64> {
        self.emod
    }
}
