//! vc_calibration — Voce-Chaboche calibration support with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the calibration support layer to Python via the
//! `_vc_calibration` extension module. The crate supplies the pieces a
//! constrained-optimization driver needs around the Voce-Chaboche cyclic
//! plasticity model: parameter-vector decoding, ratio constraints with
//! exact derivatives, elastic-modulus estimation, and iteration recording.
//! The SQP/interior-point solver itself lives elsewhere.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`material`, `constraints`, `modulus`,
//!   `recorder`) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_vc_calibration` Python extension.
//! - Create and register Python submodules (`constraints`, `modulus`) under
//!   `vc_calibration` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts (e.g.
//!   `ConstraintSet`, `ElasticModulus`).
//!
//! Conventions
//! -----------
//! - Parameter vectors, gradients, and Hessians follow the layout and shape
//!   conventions documented in `material::layout` and `constraints::bounded`.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_vc_calibration` module defined
//!   here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the pipeline integration test under `tests/`.

pub mod constraints;
pub mod material;
pub mod modulus;
pub mod recorder;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    constraints::{
        bounded::{Constraint, standard_constraint_set},
        constants::{ConstraintConstants, Variables},
    },
    modulus::{compute_modulus, compute_modulus_avg},
    utils::{extract_constants, extract_curve, extract_modulus_options, extract_param_vector},
};

/// ConstraintSet — Python-facing wrapper for the Voce-Chaboche constraint
/// set.
///
/// Purpose
/// -------
/// Hold the configured run constants and the ten standard-form constraints
/// (five ratio families, lower and upper), and evaluate value, gradient, and
/// Hessian for any of them by name from Python.
///
/// Key behaviors
/// -------------
/// - Validate bound pairs and the basic-block size at construction.
/// - Convert Python arrays into contiguous `f64` vectors and forward
///   evaluation to the core [`Constraint`] implementations.
/// - Surface layout and applicability failures as `ValueError`.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ConstraintSet(n_basic_param, yield_ratio, iso_share, gamma_rate,
/// gamma_pair, kin_balance)` where each bound argument is an
/// `(inf, sup)` tuple with `inf <= sup`.
///
/// Notes
/// -----
/// - Native Rust callers should use [`standard_constraint_set`] directly;
///   this type exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "vc_calibration.constraints", unsendable)]
pub struct ConstraintSet {
    constants: ConstraintConstants,
    variables: Variables,
    set: Vec<Box<dyn Constraint>>,
}

#[cfg(feature = "python-bindings")]
impl ConstraintSet {
    fn find(&self, name: &str) -> PyResult<&dyn Constraint> {
        self.set.iter().find(|c| c.name() == name).map(|c| c.as_ref()).ok_or_else(|| {
            PyValueError::new_err(format!("unknown constraint {name:?} (see ConstraintSet.names())"))
        })
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ConstraintSet {
    #[new]
    #[pyo3(
        text_signature = "(n_basic_param, yield_ratio, iso_share, gamma_rate, gamma_pair, \
                          kin_balance, /)"
    )]
    pub fn new(
        n_basic_param: usize, yield_ratio: (f64, f64), iso_share: (f64, f64),
        gamma_rate: (f64, f64), gamma_pair: (f64, f64), kin_balance: (f64, f64),
    ) -> PyResult<Self> {
        let constants = extract_constants(
            n_basic_param,
            yield_ratio,
            iso_share,
            gamma_rate,
            gamma_pair,
            kin_balance,
        )?;
        Ok(ConstraintSet { constants, variables: Variables::new(), set: standard_constraint_set() })
    }

    /// Names of the ten constraints, family by family, lower before upper.
    pub fn names(&self) -> Vec<String> {
        self.set.iter().map(|c| c.name()).collect()
    }

    /// Standard-form value of the named constraint; satisfied iff ≤ 0.
    pub fn value<'py>(&self, py: Python<'py>, name: &str, x: &Bound<'py, PyAny>) -> PyResult<f64> {
        let x = extract_param_vector(py, x)?;
        let value = self.find(name)?.value(x.view(), &self.constants, &self.variables)?;
        Ok(value)
    }

    /// Gradient of the named constraint, length `len(x)`.
    pub fn gradient<'py>(
        &self, py: Python<'py>, name: &str, x: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let x = extract_param_vector(py, x)?;
        let grad = self.find(name)?.gradient(x.view(), &self.constants, &self.variables)?;
        Ok(grad.to_vec())
    }

    /// Hessian of the named constraint as a row-major nested list,
    /// `len(x) × len(x)`.
    pub fn hessian<'py>(
        &self, py: Python<'py>, name: &str, x: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<Vec<f64>>> {
        let x = extract_param_vector(py, x)?;
        let hess = self.find(name)?.hessian(x.view(), &self.constants, &self.variables)?;
        let (nrows, _ncols) = hess.dim();
        let mut out = Vec::with_capacity(nrows);
        for i in 0..nrows {
            out.push(hess.row(i).to_vec());
        }
        Ok(out)
    }
}

/// ElasticModulus — Python-facing wrapper for elastic-modulus estimation.
///
/// Purpose
/// -------
/// Estimate Young's modulus from one stress-strain curve, or average the
/// estimate over several curves, and expose the result as a read-only
/// property.
///
/// Key behaviors
/// -------------
/// - Validate and convert Python strain/stress arrays into a
///   [`StressStrainCurve`](crate::modulus::StressStrainCurve).
/// - Forward estimation to [`compute_modulus`] / [`compute_modulus_avg`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ElasticModulus(strain, stress, yield_fraction=0.66, nominal_yield=345.0)`
/// or `ElasticModulus.average(curves, ...)` where `curves` is a sequence of
/// `(strain, stress)` pairs.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "vc_calibration.modulus")]
pub struct ElasticModulus {
    value: f64,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ElasticModulus {
    #[new]
    #[pyo3(
        signature = (strain, stress, yield_fraction = None, nominal_yield = None),
        text_signature = "(strain, stress, /, yield_fraction=0.66, nominal_yield=345.0)"
    )]
    pub fn from_curve<'py>(
        py: Python<'py>, strain: &Bound<'py, PyAny>, stress: &Bound<'py, PyAny>,
        yield_fraction: Option<f64>, nominal_yield: Option<f64>,
    ) -> PyResult<Self> {
        let curve = extract_curve(py, strain, stress)?;
        let options = extract_modulus_options(yield_fraction, nominal_yield)?;
        let value = compute_modulus(&curve, &options)?;
        Ok(ElasticModulus { value })
    }

    #[staticmethod]
    #[pyo3(
        signature = (curves, yield_fraction = None, nominal_yield = None),
        text_signature = "(curves, /, yield_fraction=0.66, nominal_yield=345.0)"
    )]
    pub fn average<'py>(
        py: Python<'py>, curves: Vec<(Bound<'py, PyAny>, Bound<'py, PyAny>)>,
        yield_fraction: Option<f64>, nominal_yield: Option<f64>,
    ) -> PyResult<Self> {
        let options = extract_modulus_options(yield_fraction, nominal_yield)?;
        let mut extracted = Vec::with_capacity(curves.len());
        for (strain, stress) in &curves {
            extracted.push(extract_curve(py, strain, stress)?);
        }
        let value = compute_modulus_avg(&extracted, &options)?;
        Ok(ElasticModulus { value })
    }

    /// The estimated modulus, in the stress units of the curve.
    #[getter]
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// _vc_calibration — PyO3 module initializer for the Python extension.
///
/// Creates the `constraints` and `modulus` submodules, attaches them to the
/// parent `_vc_calibration` module, and registers them in `sys.modules` so
/// they are importable via dotted paths from Python. Invoked automatically
/// by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _vc_calibration<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let constraints_mod = PyModule::new(_py, "constraints")?;
    let modulus_mod = PyModule::new(_py, "modulus")?;
    constraints_submodule(_py, m, &constraints_mod)?;
    modulus_submodule(_py, m, &modulus_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("vc_calibration.constraints", constraints_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("vc_calibration.modulus", modulus_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn constraints_submodule<'py>(
    _py: Python, vc_calibration: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ConstraintSet>()?;
    vc_calibration.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn modulus_submodule<'py>(
    _py: Python, vc_calibration: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ElasticModulus>()?;
    vc_calibration.add_submodule(m)?;
    Ok(())
}
