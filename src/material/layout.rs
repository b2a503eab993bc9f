//! Flat-vector layout for Voce-Chaboche parameters.
//!
//! The optimizer works on a flat `x` with layout
//! `[basic block | C₁, γ₁, C₂, γ₂, …]`:
//! - indices `[0, n_basic_param)` hold the basic model parameters, with
//!   `sy0` at `n_basic_param − 3`, `q_inf` at `n_basic_param − 2`, and the
//!   isotropic rate `b` at `n_basic_param − 1`;
//! - the tail holds interleaved backstress `(C_k, γ_k)` pairs.
//!
//! Every constraint and every parameter conversion decodes through this one
//! type; no other module performs index arithmetic on `x`.
use crate::material::errors::{ParamError, ParamResult};

/// Decoded layout of a flat Voce-Chaboche parameter vector.
///
/// Invariants (validated by [`ParamLayout::from_len`]):
/// - `n_basic_param >= 3`
/// - `len >= n_basic_param`
/// - `len - n_basic_param` is even, giving
///   `n_backstresses = (len - n_basic_param) / 2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLayout {
    pub n_basic_param: usize,
    pub n_backstresses: usize,
}

impl ParamLayout {
    /// Decode the layout of a vector of length `len` with `n_basic_param`
    /// leading basic parameters.
    ///
    /// # Errors
    /// - [`ParamError::BasicBlockTooSmall`] if `n_basic_param < 3` (the block
    ///   must hold `sy0`, `q_inf`, and `b`).
    /// - [`ParamError::VectorTooShort`] if `len < n_basic_param`.
    /// - [`ParamError::LengthParityMismatch`] if the backstress tail has odd
    ///   length, i.e. `(len - n_basic_param) % 2 != 0`.
    ///
    /// # Rationale
    /// A vector whose length is inconsistent with an integer backstress count
    /// is invalid input everywhere downstream; failing here keeps every
    /// constraint evaluation free of length checks of its own.
    pub fn from_len(len: usize, n_basic_param: usize) -> ParamResult<Self> {
        if n_basic_param < 3 {
            return Err(ParamError::BasicBlockTooSmall { n_basic_param });
        }
        if len < n_basic_param {
            return Err(ParamError::VectorTooShort { len, n_basic_param });
        }
        if (len - n_basic_param) % 2 != 0 {
            return Err(ParamError::LengthParityMismatch { len, n_basic_param });
        }
        Ok(ParamLayout { n_basic_param, n_backstresses: (len - n_basic_param) / 2 })
    }

    /// Total vector length implied by this layout.
    pub fn len(&self) -> usize {
        self.n_basic_param + 2 * self.n_backstresses
    }

    /// True when the layout describes an empty backstress tail and a minimal
    /// basic block only. Kept for `len`/`is_empty` pairing conventions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the initial yield stress `sy0`.
    pub fn sy0_index(&self) -> usize {
        self.n_basic_param - 3
    }

    /// Index of the isotropic saturation stress `q_inf`.
    pub fn q_inf_index(&self) -> usize {
        self.n_basic_param - 2
    }

    /// Index of the isotropic rate parameter `b`.
    pub fn b_index(&self) -> usize {
        self.n_basic_param - 1
    }

    /// Index of the kinematic modulus `C_k` of the 0-based backstress `k`.
    ///
    /// # Errors
    /// - [`ParamError::BackstressOutOfRange`] if `k >= n_backstresses`.
    pub fn c_index(&self, k: usize) -> ParamResult<usize> {
        self.check_backstress(k)?;
        Ok(self.n_basic_param + 2 * k)
    }

    /// Index of the kinematic rate `γ_k` of the 0-based backstress `k`.
    ///
    /// # Errors
    /// - [`ParamError::BackstressOutOfRange`] if `k >= n_backstresses`.
    pub fn gamma_index(&self, k: usize) -> ParamResult<usize> {
        self.check_backstress(k)?;
        Ok(self.n_basic_param + 2 * k + 1)
    }

    fn check_backstress(&self, k: usize) -> ParamResult<()> {
        if k >= self.n_backstresses {
            return Err(ParamError::BackstressOutOfRange {
                index: k,
                n_backstresses: self.n_backstresses,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Length/parity validation in `from_len`.
    // - The basic-parameter and backstress index identities.
    //
    // They intentionally DO NOT cover:
    // - Physical-domain validation (owned by `material::params`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the canonical two-backstress, four-basic-parameter layout
    // decodes to the documented indices.
    //
    // Given
    // -----
    // - len = 8, n_basic_param = 4 (E, sy0, q_inf, b, C1, γ1, C2, γ2).
    //
    // Expect
    // ------
    // - sy0 at 1, q_inf at 2, b at 3, C1 at 4, γ1 at 5, C2 at 6, γ2 at 7.
    fn from_len_canonical_two_backstress_layout_has_documented_indices() {
        let layout = ParamLayout::from_len(8, 4).unwrap();
        assert_eq!(layout.n_backstresses, 2);
        assert_eq!(layout.sy0_index(), 1);
        assert_eq!(layout.q_inf_index(), 2);
        assert_eq!(layout.b_index(), 3);
        assert_eq!(layout.c_index(0).unwrap(), 4);
        assert_eq!(layout.gamma_index(0).unwrap(), 5);
        assert_eq!(layout.c_index(1).unwrap(), 6);
        assert_eq!(layout.gamma_index(1).unwrap(), 7);
        assert_eq!(layout.len(), 8);
    }

    #[test]
    // Purpose
    // -------
    // Verify that an odd backstress tail is rejected before any decoding.
    //
    // Given
    // -----
    // - len = 7, n_basic_param = 4, leaving 3 tail entries.
    //
    // Expect
    // ------
    // - `ParamError::LengthParityMismatch`.
    fn from_len_rejects_odd_backstress_tail() {
        let got = ParamLayout::from_len(7, 4);
        assert_eq!(got, Err(ParamError::LengthParityMismatch { len: 7, n_basic_param: 4 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify lower-bound validation of the basic block and vector length.
    //
    // Given
    // -----
    // - n_basic_param = 2 (too small) and len = 2 with n_basic_param = 4.
    //
    // Expect
    // ------
    // - `BasicBlockTooSmall` and `VectorTooShort` respectively.
    fn from_len_rejects_small_basic_block_and_short_vector() {
        assert_eq!(
            ParamLayout::from_len(6, 2),
            Err(ParamError::BasicBlockTooSmall { n_basic_param: 2 })
        );
        assert_eq!(
            ParamLayout::from_len(2, 4),
            Err(ParamError::VectorTooShort { len: 2, n_basic_param: 4 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that a zero-backstress vector is valid and that out-of-range
    // backstress lookups fail.
    //
    // Given
    // -----
    // - len = 3, n_basic_param = 3.
    //
    // Expect
    // ------
    // - n_backstresses = 0 and `BackstressOutOfRange` on index 0.
    fn from_len_allows_zero_backstresses_and_guards_pair_lookups() {
        let layout = ParamLayout::from_len(3, 3).unwrap();
        assert_eq!(layout.n_backstresses, 0);
        assert!(matches!(layout.c_index(0), Err(ParamError::BackstressOutOfRange { .. })));
    }
}
