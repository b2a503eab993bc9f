//! Voce-Chaboche parameter record and flat-vector mapping.
//!
//! This module provides the **named, validated** parameter container
//! [`VcParams`] and its mapping to and from the **optimizer-space** flat
//! vector `x` (as `ndarray::Array1<f64>`).
//!
//! ## What this module defines
//! - [`Backstress`]: one kinematic hardening pair `(C_k, γ_k)` with its
//!   saturation stress `C_k / γ_k`.
//! - [`VcParams`]: basic parameters `(leading…, sy0, q_inf, b)` plus an
//!   indexable sequence of backstress pairs, validated at construction.
//!
//! ## Mapping conventions
//! - `x = [leading… | sy0 | q_inf | b | C₁, γ₁, C₂, γ₂, …]`; the basic block
//!   has length `leading.len() + 3`, so the elastic modulus (when carried)
//!   lives in `leading` and everything else sits at the fixed offsets
//!   defined by [`ParamLayout`].
//! - [`VcParams::from_x`] fails fast on length/parity violations before any
//!   field is read; [`VcParams::to_x`] always produces a vector that decodes
//!   back to an equal record.
//!
//! ## Invariants validated by constructors
//! - every `leading` entry finite
//! - `sy0 > 0`, `b > 0` (both divide in the constraint ratios)
//! - `q_inf ≥ 0`, `C_k ≥ 0`
//! - `γ_k > 0` elementwise (every `γ_k` divides)
use crate::material::{
    errors::{ParamError, ParamResult},
    layout::ParamLayout,
    validation::{validate_finite_vector, validate_non_negative, validate_strictly_positive},
};
use ndarray::{Array1, ArrayView1};

/// One kinematic hardening (backstress) term of the Chaboche sum.
///
/// Invariants: `c ≥ 0` finite, `gamma > 0` finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backstress {
    /// Kinematic modulus `C_k ≥ 0`.
    pub c: f64,
    /// Kinematic rate `γ_k > 0`.
    pub gamma: f64,
}

impl Backstress {
    /// Create a validated backstress pair.
    ///
    /// # Errors
    /// - [`ParamError::NegativeParam`] if `c` is negative or non-finite.
    /// - [`ParamError::NonPositiveParam`] if `gamma` is ≤ 0 or non-finite.
    pub fn new(c: f64, gamma: f64) -> ParamResult<Self> {
        validate_non_negative("C", c)?;
        validate_strictly_positive("gamma", gamma)?;
        Ok(Backstress { c, gamma })
    }

    /// Saturation stress contributed by this term, `C_k / γ_k`.
    pub fn saturation(&self) -> f64 {
        self.c / self.gamma
    }
}

/// Validated **model-space** parameters of the Voce-Chaboche model.
///
/// Invariants are validated at construction; use this type when assembling
/// initial points and when materializing a fitted optimum. Constraint
/// evaluation itself operates on raw vectors, since an optimizer may probe
/// points outside the physical domain.
#[derive(Debug, Clone, PartialEq)]
pub struct VcParams {
    /// Basic parameters ahead of `sy0` (the elastic modulus when included).
    pub leading: Vec<f64>,
    /// Initial yield stress, > 0.
    pub sy0: f64,
    /// Isotropic saturation stress `Q_∞ ≥ 0`.
    pub q_inf: f64,
    /// Isotropic rate parameter, > 0.
    pub b: f64,
    /// Kinematic hardening terms, in layout order.
    pub backstresses: Vec<Backstress>,
}

impl VcParams {
    /// Create validated model-space parameters.
    ///
    /// Validates:
    /// - every `leading` entry finite
    /// - `sy0 > 0` and `b > 0`
    /// - `q_inf ≥ 0`
    /// - every backstress pair (`C_k ≥ 0`, `γ_k > 0`)
    ///
    /// Returns an error if any check fails. On success, every denominator
    /// appearing in the constraint ratios is strictly positive.
    pub fn new(
        leading: Vec<f64>, sy0: f64, q_inf: f64, b: f64, backstresses: Vec<Backstress>,
    ) -> ParamResult<Self> {
        for (index, &value) in leading.iter().enumerate() {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteEntry { index, value });
            }
        }
        validate_strictly_positive("sy0", sy0)?;
        validate_non_negative("q_inf", q_inf)?;
        validate_strictly_positive("b", b)?;
        for pair in &backstresses {
            validate_non_negative("C", pair.c)?;
            validate_strictly_positive("gamma", pair.gamma)?;
        }
        Ok(VcParams { leading, sy0, q_inf, b, backstresses })
    }

    /// Build validated model-space parameters from an optimizer-space vector.
    ///
    /// # Arguments
    /// - `x`: flat vector with layout `[basic block | C₁, γ₁, …]`.
    /// - `n_basic_param`: length of the basic block.
    ///
    /// # Errors
    /// - Layout errors from [`ParamLayout::from_len`] (parity, lengths).
    /// - [`ParamError::NonFiniteEntry`] if any entry is NaN/±inf.
    /// - Domain errors if the decoded fields violate the record invariants.
    ///
    /// # Rationale
    /// This is the post-fit materialization path: pass the optimizer's final
    /// `x` to persist a named record for reporting and downstream simulation.
    pub fn from_x(x: ArrayView1<f64>, n_basic_param: usize) -> ParamResult<Self> {
        let layout = ParamLayout::from_len(x.len(), n_basic_param)?;
        validate_finite_vector(x)?;
        let leading = x.iter().take(layout.sy0_index()).copied().collect();
        let sy0 = x[layout.sy0_index()];
        let q_inf = x[layout.q_inf_index()];
        let b = x[layout.b_index()];
        let mut backstresses = Vec::with_capacity(layout.n_backstresses);
        for k in 0..layout.n_backstresses {
            backstresses.push(Backstress::new(x[layout.c_index(k)?], x[layout.gamma_index(k)?])?);
        }
        VcParams::new(leading, sy0, q_inf, b, backstresses)
    }

    /// Map model-space parameters to the **optimizer-space** flat vector.
    ///
    /// Layout: `[leading… | sy0 | q_inf | b | C₁, γ₁, C₂, γ₂, …]`.
    /// Returns a newly allocated `Array1<f64>` of length
    /// `n_basic_param + 2 * n_backstresses`.
    pub fn to_x(&self) -> Array1<f64> {
        let layout = self.layout();
        let mut x = Array1::<f64>::zeros(layout.len());
        for (slot, &value) in x.iter_mut().zip(self.leading.iter()) {
            *slot = value;
        }
        x[layout.sy0_index()] = self.sy0;
        x[layout.q_inf_index()] = self.q_inf;
        x[layout.b_index()] = self.b;
        for (k, pair) in self.backstresses.iter().enumerate() {
            // Indices are in range by construction of `layout`.
            x[layout.n_basic_param + 2 * k] = pair.c;
            x[layout.n_basic_param + 2 * k + 1] = pair.gamma;
        }
        x
    }

    /// Layout of the flat vector produced by [`VcParams::to_x`].
    pub fn layout(&self) -> ParamLayout {
        ParamLayout {
            n_basic_param: self.n_basic_param(),
            n_backstresses: self.backstresses.len(),
        }
    }

    /// Length of the basic block: `leading.len() + 3`.
    pub fn n_basic_param(&self) -> usize {
        self.leading.len() + 3
    }

    /// Total kinematic saturation stress, `Σ_k C_k / γ_k`.
    pub fn kinematic_saturation(&self) -> f64 {
        self.backstresses.iter().map(Backstress::saturation).sum()
    }

    /// Stress at full saturation, `sy0 + q_inf + Σ_k C_k / γ_k`.
    pub fn saturation_stress(&self) -> f64 {
        self.sy0 + self.q_inf + self.kinematic_saturation()
    }
}
