//! constraints — engineering bounds on Voce-Chaboche parameter ratios.
//!
//! Purpose
//! -------
//! Provide the constrained-optimization support surface a second-order
//! solver consumes: standard-form (≤ 0) inequality constraints on ratios of
//! fitted parameters, together with analytic gradients and Hessians, plus
//! the immutable per-run configuration they read.
//!
//! Key behaviors
//! -------------
//! - Five ratio families ([`ratios`]) with closed-form derivatives, decoded
//!   through the single [`crate::material::ParamLayout`].
//! - Generic lower/upper bounding in [`bounded`]; the lower form is the
//!   negated upper form shifted by a constant, derived once.
//! - Run constants and the uniform auxiliary-variables argument in
//!   [`constants`]; structured errors in [`errors`].
//!
//! Conventions
//! -----------
//! - A constraint is satisfied when its value is ≤ 0.
//! - Gradients are flat `Array1<f64>` of length `len(x)`; Hessians are
//!   symmetric `Array2<f64>` of size `len(x) × len(x)`.
//! - Evaluation is pure: every call reads only its arguments and allocates
//!   fresh outputs, so constraints may be evaluated concurrently.
//! - Degenerate trial points propagate ±∞/NaN; malformed vector layouts
//!   fail fast with [`ConstraintError`] before any arithmetic.

pub mod bounded;
pub mod constants;
pub mod errors;
pub mod ratios;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bounded::{BoundSide, BoundedConstraint, Constraint, standard_constraint_set};
pub use self::constants::{BoundPair, ConstraintConstants, Variables};
pub use self::errors::{ConstraintError, ConstraintResult};
pub use self::ratios::{
    GammaPair, GammaToIsotropicRate, IsotropicShare, KinematicBalance, RatioConstraint,
    SaturationToYield,
};
