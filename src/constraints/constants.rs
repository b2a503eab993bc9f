//! Constraint configuration — bound pairs, run constants, and the shared
//! auxiliary-variables container.
//!
//! Purpose
//! -------
//! Hold everything a constraint evaluation needs besides the trial vector
//! itself: the basic-block size and the engineering bound pairs for each
//! ratio family ([`ConstraintConstants`]), plus the uniform
//! auxiliary-variables argument ([`Variables`]) that every evaluation entry
//! point accepts.
//!
//! Conventions
//! -----------
//! - Bound pairs are `(inf, sup)` with `inf ≤ sup`, both finite; a constraint
//!   in standard form is `ratio − sup ≤ 0` (upper) or `inf − ratio ≤ 0`
//!   (lower).
//! - Constants are immutable for the duration of one calibration run; clone
//!   them per run rather than mutating.
//! - [`Variables`] is reserved for ratio terms that depend on the trial
//!   vector but are computed once and shared across several constraints.
//!   None of the current families require it; all accept it uniformly.
use crate::constraints::errors::{ConstraintError, ConstraintResult};
use std::collections::HashMap;

/// Inclusive lower/upper bound on one constraint ratio.
///
/// Invariant: `inf <= sup`, both finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundPair {
    pub inf: f64,
    pub sup: f64,
}

impl BoundPair {
    /// Create a validated bound pair.
    ///
    /// # Errors
    /// - [`ConstraintError::InvalidBoundPair`] if either bound is non-finite
    ///   or `inf > sup`. The `name` is carried into the error for context.
    pub fn new(name: &'static str, inf: f64, sup: f64) -> ConstraintResult<Self> {
        if !inf.is_finite() || !sup.is_finite() || inf > sup {
            return Err(ConstraintError::InvalidBoundPair { name, inf, sup });
        }
        Ok(BoundPair { inf, sup })
    }
}

/// Immutable per-run constants for the Voce-Chaboche constraint set.
///
/// Field names follow the conventional ρ (rho) bound identifiers:
/// `yield_ratio` ↔ `rho_yield_inf/sup`, `iso_share` ↔ `rho_iso_inf/sup`,
/// `gamma_rate` ↔ `rho_gamma_inf/sup`, `gamma_pair` ↔ `rho_gamma_12_inf/sup`,
/// and `kin_balance` ↔ `rho_kin_ratio_inf/sup`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintConstants {
    /// Length of the basic block of the flat vector; ≥ 3.
    pub n_basic_param: usize,
    /// Bounds on `(sy0 + q_inf + Σ C_k/γ_k) / sy0`.
    pub yield_ratio: BoundPair,
    /// Bounds on `q_inf / (q_inf + Σ C_k/γ_k)`.
    pub iso_share: BoundPair,
    /// Bounds on `γ₁ / b`.
    pub gamma_rate: BoundPair,
    /// Bounds on `γ₁ / γ₂`.
    pub gamma_pair: BoundPair,
    /// Bounds on `(C₁/γ₁) / (C₂/γ₂)`.
    pub kin_balance: BoundPair,
}

impl ConstraintConstants {
    /// Create validated run constants.
    ///
    /// # Errors
    /// - [`ConstraintError::BasicBlockTooSmall`] if `n_basic_param < 3`.
    ///
    /// Bound pairs are validated at their own construction; passing them
    /// here cannot fail further.
    pub fn new(
        n_basic_param: usize, yield_ratio: BoundPair, iso_share: BoundPair, gamma_rate: BoundPair,
        gamma_pair: BoundPair, kin_balance: BoundPair,
    ) -> ConstraintResult<Self> {
        if n_basic_param < 3 {
            return Err(ConstraintError::BasicBlockTooSmall { n_basic_param });
        }
        Ok(ConstraintConstants {
            n_basic_param,
            yield_ratio,
            iso_share,
            gamma_rate,
            gamma_pair,
            kin_balance,
        })
    }
}

/// Auxiliary values shared across constraint evaluations at one trial point.
///
/// Part of the evaluation contract: every constraint accepts a `&Variables`
/// and either uses or ignores it uniformly. The current ratio families
/// compute everything from the trial vector directly, so this container is
/// reserved for future shared terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: HashMap<String, f64>,
}

impl Variables {
    /// Empty container; the usual argument for the current constraint set.
    pub fn new() -> Self {
        Variables::default()
    }

    /// Store a shared term under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Look up a shared term by `key`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}
