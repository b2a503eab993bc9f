#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    constraints::constants::{BoundPair, ConstraintConstants},
    modulus::{ModulusOptions, StressStrainCurve},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_param_vector<'py>(
    py: Python<'py>, raw_x: &Bound<'py, PyAny>,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_x)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("x must be a 1-D contiguous float64 array or sequence")
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_curve<'py>(
    py: Python<'py>, strain: &Bound<'py, PyAny>, stress: &Bound<'py, PyAny>,
) -> PyResult<StressStrainCurve> {
    let strain_arr = extract_f64_array(py, strain)?;
    let stress_arr = extract_f64_array(py, stress)?;
    let strain_slice = strain_arr.as_slice().map_err(|_| {
        PyValueError::new_err("strain must be a 1-D contiguous float64 array or sequence")
    })?;
    let stress_slice = stress_arr.as_slice().map_err(|_| {
        PyValueError::new_err("stress must be a 1-D contiguous float64 array or sequence")
    })?;
    let curve = StressStrainCurve::new(
        Array1::from(strain_slice.to_vec()),
        Array1::from(stress_slice.to_vec()),
    )?;
    Ok(curve)
}

#[cfg(feature = "python-bindings")]
pub fn extract_modulus_options(
    yield_fraction: Option<f64>, nominal_yield: Option<f64>,
) -> PyResult<ModulusOptions> {
    let defaults = ModulusOptions::default();
    let options = ModulusOptions::new(
        yield_fraction.unwrap_or(defaults.yield_fraction),
        nominal_yield.unwrap_or(defaults.nominal_yield),
    )?;
    Ok(options)
}

#[cfg(feature = "python-bindings")]
pub fn extract_constants(
    n_basic_param: usize, yield_ratio: (f64, f64), iso_share: (f64, f64), gamma_rate: (f64, f64),
    gamma_pair: (f64, f64), kin_balance: (f64, f64),
) -> PyResult<ConstraintConstants> {
    let constants = ConstraintConstants::new(
        n_basic_param,
        BoundPair::new("yield_ratio", yield_ratio.0, yield_ratio.1)?,
        BoundPair::new("iso_share", iso_share.0, iso_share.1)?,
        BoundPair::new("gamma_rate", gamma_rate.0, gamma_rate.1)?,
        BoundPair::new("gamma_pair", gamma_pair.0, gamma_pair.1)?,
        BoundPair::new("kin_balance", kin_balance.0, kin_balance.1)?,
    )?;
    Ok(constants)
}
