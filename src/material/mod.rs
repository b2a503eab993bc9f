//! material — Voce-Chaboche parameter layout, records, and validation.
//!
//! Purpose
//! -------
//! Define the structural side of the calibration problem: how a flat
//! optimizer vector decodes into named Voce-Chaboche parameters, a validated
//! record type for model-space parameters, and the reusable validation
//! helpers both rely on. The constraint layer builds on [`ParamLayout`];
//! driver code builds on [`VcParams`].
//!
//! Key behaviors
//! -------------
//! - Centralize every piece of index arithmetic on the flat vector in
//!   [`ParamLayout`], validated once per evaluation.
//! - Provide [`VcParams`] / [`Backstress`] with `from_x` / `to_x` mappings
//!   that round-trip losslessly.
//! - Surface structured [`ParamError`] values for malformed vectors and
//!   physically degenerate records.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. The flat layout is
//!   `[leading… | sy0 | q_inf | b | C₁, γ₁, C₂, γ₂, …]`.
//! - Raw optimizer iterates are never domain-validated here; only the named
//!   record enforces strict positivity of the denominators.

pub mod errors;
pub mod layout;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ParamError, ParamResult};
pub use self::layout::ParamLayout;
pub use self::params::{Backstress, VcParams};
pub use self::validation::{
    validate_finite_vector, validate_non_negative, validate_strictly_positive,
};
