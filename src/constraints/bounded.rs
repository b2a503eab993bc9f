//! bounded — standard-form (≤ 0) inequality constraints over the ratio
//! families.
//!
//! Purpose
//! -------
//! Wrap each [`RatioConstraint`] family into the lower/upper standard forms
//! the optimizer consumes. The sign handling is derived once here: for a
//! family with ratio `r(x)` and bounds `(inf, sup)`,
//!
//! ```text
//! upper: g(x) = r(x) − sup ≤ 0
//! lower: g(x) = inf − r(x) ≤ 0
//! ```
//!
//! so a lower constraint is exactly the negated upper constraint shifted by
//! a constant, and its gradient and Hessian are the negated ones of the raw
//! ratio.
//!
//! Key behaviors
//! -------------
//! - Validate the trial vector's layout and the family's minimum backstress
//!   count once per call, before any arithmetic.
//! - Expose one fixed shape convention: gradients are flat `Array1<f64>` of
//!   length `len(x)`, Hessians are `len(x) × len(x)`.
//! - Accept the uniform `(x, constants, variables)` argument triple on every
//!   entry point so an optimizer driver can treat all constraints alike.
//!
//! Downstream usage
//! ----------------
//! - Drivers collect [`standard_constraint_set`] (all five families, both
//!   sides) or construct individual [`BoundedConstraint`] values, then call
//!   `value` / `gradient` / `hessian` at each trial point through the
//!   object-safe [`Constraint`] trait.
use crate::constraints::{
    constants::{ConstraintConstants, Variables},
    errors::{ConstraintError, ConstraintResult},
    ratios::{
        GammaPair, GammaToIsotropicRate, IsotropicShare, KinematicBalance, RatioConstraint,
        SaturationToYield,
    },
};
use crate::material::layout::ParamLayout;
use ndarray::{Array1, Array2, ArrayView1};

/// Which side of the bound pair a constraint enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl std::fmt::Display for BoundSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundSide::Lower => write!(f, "lower"),
            BoundSide::Upper => write!(f, "upper"),
        }
    }
}

/// Object-safe evaluation surface of one standard-form constraint.
///
/// Satisfied when `value(x) ≤ 0`. All implementations tolerate being probed
/// at infeasible or boundary `x`; degenerate points yield non-finite values
/// rather than errors.
pub trait Constraint {
    /// Identifier of the form `<family>_<side>`, e.g. `gamma_pair_upper`.
    fn name(&self) -> String;

    /// Constraint value in standard form.
    fn value(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants, variables: &Variables,
    ) -> ConstraintResult<f64>;

    /// Gradient with respect to `x`, length `x.len()`.
    fn gradient(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants, variables: &Variables,
    ) -> ConstraintResult<Array1<f64>>;

    /// Hessian with respect to `x`, `x.len() × x.len()`, symmetric.
    fn hessian(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants, variables: &Variables,
    ) -> ConstraintResult<Array2<f64>>;
}

/// One ratio family bound on one side, in standard form.
#[derive(Debug, Clone, Copy)]
pub struct BoundedConstraint<R: RatioConstraint> {
    family: R,
    side: BoundSide,
}

impl<R: RatioConstraint> BoundedConstraint<R> {
    pub fn new(family: R, side: BoundSide) -> Self {
        BoundedConstraint { family, side }
    }

    /// Decode and validate the layout for this family.
    ///
    /// # Errors
    /// - Layout errors from [`ParamLayout::from_len`].
    /// - [`ConstraintError::InsufficientBackstresses`] when the vector holds
    ///   fewer pairs than the family requires.
    fn checked_layout(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants,
    ) -> ConstraintResult<ParamLayout> {
        let layout = ParamLayout::from_len(x.len(), constants.n_basic_param)?;
        let required = self.family.min_backstresses();
        if layout.n_backstresses < required {
            return Err(ConstraintError::InsufficientBackstresses {
                name: self.family.name(),
                required,
                found: layout.n_backstresses,
            });
        }
        Ok(layout)
    }
}

impl<R: RatioConstraint> Constraint for BoundedConstraint<R> {
    fn name(&self) -> String {
        format!("{}_{}", self.family.name(), self.side)
    }

    fn value(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants, _variables: &Variables,
    ) -> ConstraintResult<f64> {
        let layout = self.checked_layout(x, constants)?;
        let bounds = self.family.bounds(constants);
        let r = self.family.ratio(x, &layout)?;
        Ok(match self.side {
            BoundSide::Upper => r - bounds.sup,
            BoundSide::Lower => bounds.inf - r,
        })
    }

    fn gradient(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants, _variables: &Variables,
    ) -> ConstraintResult<Array1<f64>> {
        let layout = self.checked_layout(x, constants)?;
        let grad = self.family.ratio_gradient(x, &layout)?;
        Ok(match self.side {
            BoundSide::Upper => grad,
            BoundSide::Lower => -grad,
        })
    }

    fn hessian(
        &self, x: ArrayView1<f64>, constants: &ConstraintConstants, _variables: &Variables,
    ) -> ConstraintResult<Array2<f64>> {
        let layout = self.checked_layout(x, constants)?;
        let hess = self.family.ratio_hessian(x, &layout)?;
        Ok(match self.side {
            BoundSide::Upper => hess,
            BoundSide::Lower => -hess,
        })
    }
}

/// The full Voce-Chaboche constraint set: every ratio family bound on both
/// sides, in a fixed order (family by family, lower before upper).
///
/// Families that need two backstress pairs (`gamma_pair`,
/// `kinematic_balance`) return [`ConstraintError::InsufficientBackstresses`]
/// when evaluated on a single-pair vector; drivers calibrating one-pair
/// models should filter on that error or assemble their own set.
pub fn standard_constraint_set() -> Vec<Box<dyn Constraint>> {
    let mut set: Vec<Box<dyn Constraint>> = Vec::with_capacity(10);
    for side in [BoundSide::Lower, BoundSide::Upper] {
        set.push(Box::new(BoundedConstraint::new(SaturationToYield, side)));
    }
    for side in [BoundSide::Lower, BoundSide::Upper] {
        set.push(Box::new(BoundedConstraint::new(IsotropicShare, side)));
    }
    for side in [BoundSide::Lower, BoundSide::Upper] {
        set.push(Box::new(BoundedConstraint::new(GammaToIsotropicRate, side)));
    }
    for side in [BoundSide::Lower, BoundSide::Upper] {
        set.push(Box::new(BoundedConstraint::new(GammaPair, side)));
    }
    for side in [BoundSide::Lower, BoundSide::Upper] {
        set.push(Box::new(BoundedConstraint::new(KinematicBalance, side)));
    }
    set
}
