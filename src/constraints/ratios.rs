//! ratios — the Voce-Chaboche hardening-ratio families with analytic
//! derivatives.
//!
//! Purpose
//! -------
//! Define the five ratio families the engineering bounds act on, each as a
//! unit struct implementing [`RatioConstraint`]: the raw ratio value plus its
//! analytic gradient and Hessian with respect to the flat parameter vector.
//! The standard-form (≤ 0) bounding, and the lower/upper sign handling, live
//! in [`crate::constraints::bounded`]; this module only knows ratios.
//!
//! Key behaviors
//! -------------
//! - Decode the trial vector exclusively through [`ParamLayout`]; no family
//!   performs its own index arithmetic. In particular the kinematic-balance
//!   family reads the first two pairs through the layout and is valid for
//!   any basic-block size, not just `n_basic_param = 4`.
//! - Return exact closed-form derivatives: every family is a rational
//!   expression, so gradients and Hessians are written out symbolically
//!   rather than differentiated numerically.
//! - Propagate degenerate trial points (zero or negative `γ_k`, `sy0`,
//!   denominator sums) as ±∞/NaN values, never clamped, so the optimizer
//!   driver can reject the point.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers validate the layout and the family's minimum backstress count
//!   before invoking a family; the `ConstraintResult` returns here exist so
//!   index lookups compose with `?` rather than panicking.
//! - Gradients have length `len(x)`; Hessians are `len(x) × len(x)` and
//!   symmetric by construction (both triangles are filled from the same
//!   expression).
//!
//! Testing notes
//! -------------
//! - Unit tests check every family against central finite differences
//!   (`finitediff`, dev-dependency) at representative points, verify Hessian
//!   symmetry, and pin the worked saturation-to-yield example value.
use crate::constraints::{
    constants::{BoundPair, ConstraintConstants},
    errors::ConstraintResult,
};
use crate::material::layout::ParamLayout;
use ndarray::{Array1, Array2, ArrayView1};

/// One hardening-ratio family: value and analytic derivatives of the raw
/// ratio `r(x)`, before any bound is applied.
///
/// Implementors decode `x` through the provided [`ParamLayout`] only. The
/// bounded standard form (`r − sup` / `inf − r`) is derived generically in
/// [`crate::constraints::bounded::BoundedConstraint`].
pub trait RatioConstraint {
    /// Stable identifier used in errors and recorder output.
    fn name(&self) -> &'static str;

    /// Bound pair for this family from the run constants.
    fn bounds(&self, constants: &ConstraintConstants) -> BoundPair;

    /// Minimum number of backstress pairs the ratio is defined for.
    fn min_backstresses(&self) -> usize;

    /// Raw ratio value at `x`.
    fn ratio(&self, x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64>;

    /// Gradient of the raw ratio, length `x.len()`.
    fn ratio_gradient(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array1<f64>>;

    /// Hessian of the raw ratio, `x.len() × x.len()`, symmetric.
    fn ratio_hessian(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array2<f64>>;
}

/// Sum of kinematic saturation terms `Σ_k C_k / γ_k` over the layout.
fn sum_c_over_gamma(x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64> {
    let mut sum = 0.0;
    for k in 0..layout.n_backstresses {
        sum += x[layout.c_index(k)?] / x[layout.gamma_index(k)?];
    }
    Ok(sum)
}

/// Ratio of stress at saturation to initial yield stress:
///
/// ```text
/// r = (sy0 + q_inf + Σ_k C_k/γ_k) / sy0
/// ```
///
/// Defined for any number of backstresses (the sum may be empty).
#[derive(Debug, Clone, Copy, Default)]
pub struct SaturationToYield;

impl RatioConstraint for SaturationToYield {
    fn name(&self) -> &'static str {
        "saturation_to_yield"
    }

    fn bounds(&self, constants: &ConstraintConstants) -> BoundPair {
        constants.yield_ratio
    }

    fn min_backstresses(&self) -> usize {
        0
    }

    fn ratio(&self, x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64> {
        let sy0 = x[layout.sy0_index()];
        let q_inf = x[layout.q_inf_index()];
        Ok((sy0 + q_inf + sum_c_over_gamma(x, layout)?) / sy0)
    }

    fn ratio_gradient(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array1<f64>> {
        let sy0 = x[layout.sy0_index()];
        let q_inf = x[layout.q_inf_index()];
        let sum = sum_c_over_gamma(x, layout)?;
        let mut grad = Array1::<f64>::zeros(x.len());
        grad[layout.sy0_index()] = -(q_inf + sum) / (sy0 * sy0);
        grad[layout.q_inf_index()] = 1.0 / sy0;
        for k in 0..layout.n_backstresses {
            let (ci, gi) = (layout.c_index(k)?, layout.gamma_index(k)?);
            let (c, gamma) = (x[ci], x[gi]);
            grad[ci] = 1.0 / (gamma * sy0);
            grad[gi] = -c / (gamma * gamma * sy0);
        }
        Ok(grad)
    }

    fn ratio_hessian(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array2<f64>> {
        let si = layout.sy0_index();
        let qi = layout.q_inf_index();
        let sy0 = x[si];
        let q_inf = x[qi];
        let sum = sum_c_over_gamma(x, layout)?;
        let sy0_2 = sy0 * sy0;
        let mut hess = Array2::<f64>::zeros((x.len(), x.len()));
        hess[[si, si]] = 2.0 * (q_inf + sum) / (sy0_2 * sy0);
        hess[[si, qi]] = -1.0 / sy0_2;
        hess[[qi, si]] = hess[[si, qi]];
        for k in 0..layout.n_backstresses {
            let (ci, gi) = (layout.c_index(k)?, layout.gamma_index(k)?);
            let (c, gamma) = (x[ci], x[gi]);
            let gamma_2 = gamma * gamma;
            hess[[si, ci]] = -1.0 / (gamma * sy0_2);
            hess[[ci, si]] = hess[[si, ci]];
            hess[[si, gi]] = c / (gamma_2 * sy0_2);
            hess[[gi, si]] = hess[[si, gi]];
            hess[[ci, gi]] = -1.0 / (gamma_2 * sy0);
            hess[[gi, ci]] = hess[[ci, gi]];
            hess[[gi, gi]] = 2.0 * c / (gamma_2 * gamma * sy0);
        }
        Ok(hess)
    }
}

/// Share of isotropic hardening in the combined hardening at saturation:
///
/// ```text
/// r = q_inf / (q_inf + Σ_k C_k/γ_k)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IsotropicShare;

impl RatioConstraint for IsotropicShare {
    fn name(&self) -> &'static str {
        "isotropic_share"
    }

    fn bounds(&self, constants: &ConstraintConstants) -> BoundPair {
        constants.iso_share
    }

    fn min_backstresses(&self) -> usize {
        0
    }

    fn ratio(&self, x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64> {
        let q_inf = x[layout.q_inf_index()];
        Ok(q_inf / (q_inf + sum_c_over_gamma(x, layout)?))
    }

    fn ratio_gradient(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array1<f64>> {
        let qi = layout.q_inf_index();
        let q_inf = x[qi];
        let sum = sum_c_over_gamma(x, layout)?;
        let denom = q_inf + sum;
        let denom_2 = denom * denom;
        let mut grad = Array1::<f64>::zeros(x.len());
        grad[qi] = sum / denom_2;
        for k in 0..layout.n_backstresses {
            let (ci, gi) = (layout.c_index(k)?, layout.gamma_index(k)?);
            let (c, gamma) = (x[ci], x[gi]);
            grad[ci] = -q_inf / (denom_2 * gamma);
            grad[gi] = q_inf * c / (denom_2 * gamma * gamma);
        }
        Ok(grad)
    }

    // The Hessian follows from the chain rule through (q_inf, S) with
    // S = Σ C_k/γ_k: r_qq = -2S/D³, r_qS = (D - 2S)/D³, r_SS = 2q/D³,
    // plus the inner derivatives of S itself.
    fn ratio_hessian(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array2<f64>> {
        let qi = layout.q_inf_index();
        let q_inf = x[qi];
        let sum = sum_c_over_gamma(x, layout)?;
        let denom = q_inf + sum;
        let denom_2 = denom * denom;
        let denom_3 = denom_2 * denom;
        let r_qq = -2.0 * sum / denom_3;
        let r_qs = (denom - 2.0 * sum) / denom_3;
        let r_ss = 2.0 * q_inf / denom_3;
        let r_s = -q_inf / denom_2;

        let mut hess = Array2::<f64>::zeros((x.len(), x.len()));
        hess[[qi, qi]] = r_qq;
        for i in 0..layout.n_backstresses {
            let (ci, gi) = (layout.c_index(i)?, layout.gamma_index(i)?);
            let (c_i, gamma_i) = (x[ci], x[gi]);
            let gamma_i2 = gamma_i * gamma_i;
            // dS/dC_i and dS/dγ_i
            let s_ci = 1.0 / gamma_i;
            let s_gi = -c_i / gamma_i2;

            hess[[qi, ci]] = r_qs * s_ci;
            hess[[ci, qi]] = hess[[qi, ci]];
            hess[[qi, gi]] = r_qs * s_gi;
            hess[[gi, qi]] = hess[[qi, gi]];

            for j in 0..layout.n_backstresses {
                let (cj, gj) = (layout.c_index(j)?, layout.gamma_index(j)?);
                let (c_j, gamma_j) = (x[cj], x[gj]);
                let gamma_j2 = gamma_j * gamma_j;
                let s_cj = 1.0 / gamma_j;
                let s_gj = -c_j / gamma_j2;

                // Parenthesized so the (j, i) iteration writes the exact
                // same value into the mirrored slot.
                hess[[ci, cj]] = r_ss * (s_ci * s_cj);
                hess[[gi, gj]] = r_ss * (s_gi * s_gj);
                hess[[ci, gj]] = r_ss * (s_ci * s_gj);
                hess[[gj, ci]] = hess[[ci, gj]];
                if i == j {
                    // Second derivatives of S within one pair.
                    hess[[ci, gi]] += r_s * (-1.0 / gamma_i2);
                    hess[[gi, ci]] = hess[[ci, gi]];
                    hess[[gi, gi]] += r_s * (2.0 * c_i / (gamma_i2 * gamma_i));
                }
            }
        }
        Ok(hess)
    }
}

/// Ratio of the first kinematic rate to the isotropic rate, `r = γ₁ / b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaToIsotropicRate;

impl RatioConstraint for GammaToIsotropicRate {
    fn name(&self) -> &'static str {
        "gamma_to_isotropic_rate"
    }

    fn bounds(&self, constants: &ConstraintConstants) -> BoundPair {
        constants.gamma_rate
    }

    fn min_backstresses(&self) -> usize {
        1
    }

    fn ratio(&self, x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64> {
        Ok(x[layout.gamma_index(0)?] / x[layout.b_index()])
    }

    fn ratio_gradient(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array1<f64>> {
        let bi = layout.b_index();
        let gi = layout.gamma_index(0)?;
        let b = x[bi];
        let mut grad = Array1::<f64>::zeros(x.len());
        grad[gi] = 1.0 / b;
        grad[bi] = -x[gi] / (b * b);
        Ok(grad)
    }

    fn ratio_hessian(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array2<f64>> {
        let bi = layout.b_index();
        let gi = layout.gamma_index(0)?;
        let b = x[bi];
        let b_2 = b * b;
        let mut hess = Array2::<f64>::zeros((x.len(), x.len()));
        hess[[bi, bi]] = 2.0 * x[gi] / (b_2 * b);
        hess[[gi, bi]] = -1.0 / b_2;
        hess[[bi, gi]] = hess[[gi, bi]];
        Ok(hess)
    }
}

/// Ratio of the first two kinematic rates, `r = γ₁ / γ₂`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GammaPair;

impl RatioConstraint for GammaPair {
    fn name(&self) -> &'static str {
        "gamma_pair"
    }

    fn bounds(&self, constants: &ConstraintConstants) -> BoundPair {
        constants.gamma_pair
    }

    fn min_backstresses(&self) -> usize {
        2
    }

    fn ratio(&self, x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64> {
        Ok(x[layout.gamma_index(0)?] / x[layout.gamma_index(1)?])
    }

    fn ratio_gradient(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array1<f64>> {
        let g1 = layout.gamma_index(0)?;
        let g2 = layout.gamma_index(1)?;
        let gamma2 = x[g2];
        let mut grad = Array1::<f64>::zeros(x.len());
        grad[g1] = 1.0 / gamma2;
        grad[g2] = -x[g1] / (gamma2 * gamma2);
        Ok(grad)
    }

    fn ratio_hessian(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array2<f64>> {
        let g1 = layout.gamma_index(0)?;
        let g2 = layout.gamma_index(1)?;
        let gamma2 = x[g2];
        let gamma2_2 = gamma2 * gamma2;
        let mut hess = Array2::<f64>::zeros((x.len(), x.len()));
        hess[[g2, g2]] = 2.0 * x[g1] / (gamma2_2 * gamma2);
        hess[[g1, g2]] = -1.0 / gamma2_2;
        hess[[g2, g1]] = hess[[g1, g2]];
        Ok(hess)
    }
}

/// Balance of the first two kinematic saturation terms:
///
/// ```text
/// r = (C₁/γ₁) / (C₂/γ₂) = C₁ γ₂ / (γ₁ C₂)
/// ```
///
/// Decoded through the layout, so it holds for any basic-block size with at
/// least two backstress pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicBalance;

impl RatioConstraint for KinematicBalance {
    fn name(&self) -> &'static str {
        "kinematic_balance"
    }

    fn bounds(&self, constants: &ConstraintConstants) -> BoundPair {
        constants.kin_balance
    }

    fn min_backstresses(&self) -> usize {
        2
    }

    fn ratio(&self, x: ArrayView1<f64>, layout: &ParamLayout) -> ConstraintResult<f64> {
        let c1 = x[layout.c_index(0)?];
        let g1 = x[layout.gamma_index(0)?];
        let c2 = x[layout.c_index(1)?];
        let g2 = x[layout.gamma_index(1)?];
        Ok((c1 / g1) / (c2 / g2))
    }

    fn ratio_gradient(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array1<f64>> {
        let (c1i, g1i) = (layout.c_index(0)?, layout.gamma_index(0)?);
        let (c2i, g2i) = (layout.c_index(1)?, layout.gamma_index(1)?);
        let (c1, g1, c2, g2) = (x[c1i], x[g1i], x[c2i], x[g2i]);
        let mut grad = Array1::<f64>::zeros(x.len());
        grad[c1i] = g2 / (g1 * c2);
        grad[g1i] = -c1 * g2 / (g1 * g1 * c2);
        grad[c2i] = -c1 * g2 / (g1 * c2 * c2);
        grad[g2i] = c1 / (g1 * c2);
        Ok(grad)
    }

    fn ratio_hessian(
        &self, x: ArrayView1<f64>, layout: &ParamLayout,
    ) -> ConstraintResult<Array2<f64>> {
        let (c1i, g1i) = (layout.c_index(0)?, layout.gamma_index(0)?);
        let (c2i, g2i) = (layout.c_index(1)?, layout.gamma_index(1)?);
        let (c1, g1, c2, g2) = (x[c1i], x[g1i], x[c2i], x[g2i]);
        let g1_2 = g1 * g1;
        let c2_2 = c2 * c2;
        let mut hess = Array2::<f64>::zeros((x.len(), x.len()));
        hess[[g1i, g1i]] = 2.0 * c1 * g2 / (g1_2 * g1 * c2);
        hess[[c2i, c2i]] = 2.0 * c1 * g2 / (g1 * c2_2 * c2);
        hess[[c1i, g1i]] = -g2 / (g1_2 * c2);
        hess[[g1i, c1i]] = hess[[c1i, g1i]];
        hess[[c1i, c2i]] = -g2 / (g1 * c2_2);
        hess[[c2i, c1i]] = hess[[c1i, c2i]];
        hess[[c1i, g2i]] = 1.0 / (g1 * c2);
        hess[[g2i, c1i]] = hess[[c1i, g2i]];
        hess[[g1i, c2i]] = c1 * g2 / (g1_2 * c2_2);
        hess[[c2i, g1i]] = hess[[g1i, c2i]];
        hess[[g1i, g2i]] = -c1 / (g1_2 * c2);
        hess[[g2i, g1i]] = hess[[g1i, g2i]];
        hess[[c2i, g2i]] = -c1 / (g1 * c2_2);
        hess[[g2i, c2i]] = hess[[c2i, g2i]];
        Ok(hess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finitediff::FiniteDiff;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Raw ratio values against hand-computed numbers.
    // - Analytic gradients against central finite differences at
    //   representative points.
    // - Analytic Hessians against finite differences of the analytic
    //   gradient, plus exact symmetry.
    //
    // They intentionally DO NOT cover:
    // - Bound application and lower/upper sign handling (see `bounded`).
    // - Degenerate (non-finite) trial points; those propagate NaN/inf by
    //   design and are the driver's concern.
    // -------------------------------------------------------------------------

    const GRAD_TOL: f64 = 1e-5;

    fn trial_point() -> (Array1<f64>, ParamLayout) {
        // E, sy0, q_inf, b, C1, γ1, C2, γ2 — the worked two-backstress point.
        let x = array![193_000.0, 300.0, 100.0, 5.0, 1_000.0, 50.0, 500.0, 20.0];
        let layout = ParamLayout::from_len(x.len(), 4).unwrap();
        (x, layout)
    }

    fn assert_close_rel(analytic: &Array1<f64>, numeric: &Array1<f64>, tol: f64) {
        for (a, n) in analytic.iter().zip(numeric.iter()) {
            let scale = 1.0_f64.max(a.abs());
            assert!(
                (a - n).abs() / scale < tol,
                "analytic {a} vs finite-difference {n} beyond tolerance {tol}"
            );
        }
    }

    fn check_family<R: RatioConstraint>(family: R) {
        let (x, layout) = trial_point();

        // Gradient vs central finite differences of the ratio.
        let f = |p: &Array1<f64>| family.ratio(p.view(), &layout).unwrap();
        let fd_grad = x.central_diff(&f);
        let grad = family.ratio_gradient(x.view(), &layout).unwrap();
        assert_close_rel(&grad, &fd_grad, GRAD_TOL);

        // Hessian vs finite differences of the analytic gradient.
        let g = |p: &Array1<f64>| family.ratio_gradient(p.view(), &layout).unwrap();
        let fd_hess = x.central_hessian(&g);
        let hess = family.ratio_hessian(x.view(), &layout).unwrap();
        for i in 0..x.len() {
            for j in 0..x.len() {
                let scale = 1.0_f64.max(hess[[i, j]].abs());
                assert!(
                    (hess[[i, j]] - fd_hess[[i, j]]).abs() / scale < GRAD_TOL,
                    "Hessian entry ({i}, {j}): analytic {} vs finite-difference {}",
                    hess[[i, j]],
                    fd_hess[[i, j]]
                );
                assert_eq!(hess[[i, j]], hess[[j, i]], "Hessian must be exactly symmetric");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the saturation-to-yield ratio at the worked two-backstress point.
    //
    // Given
    // -----
    // - x = [E, 300, 100, 5, 1000, 50, 500, 20], n_basic_param = 4.
    //
    // Expect
    // ------
    // - r = (300 + 100 + 20 + 25) / 300 = 445/300.
    fn saturation_to_yield_matches_worked_example() {
        let (x, layout) = trial_point();
        let r = SaturationToYield.ratio(x.view(), &layout).unwrap();
        assert!((r - 445.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Pin the remaining ratio values at the worked point.
    //
    // Expect
    // ------
    // - isotropic share 100/145, γ₁/b = 10, γ₁/γ₂ = 2.5,
    //   kinematic balance (1000/50)/(500/20) = 0.8.
    fn remaining_ratios_match_hand_computation() {
        let (x, layout) = trial_point();
        let share = IsotropicShare.ratio(x.view(), &layout).unwrap();
        assert!((share - 100.0 / 145.0).abs() < 1e-12);
        let rate = GammaToIsotropicRate.ratio(x.view(), &layout).unwrap();
        assert!((rate - 10.0).abs() < 1e-12);
        let pair = GammaPair.ratio(x.view(), &layout).unwrap();
        assert!((pair - 2.5).abs() < 1e-12);
        let balance = KinematicBalance.ratio(x.view(), &layout).unwrap();
        assert!((balance - 0.8).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Validate analytic gradient and Hessian of each family against finite
    // differences and exact symmetry (see `check_family`).
    fn saturation_to_yield_derivatives_match_finite_differences() {
        check_family(SaturationToYield);
    }

    #[test]
    fn isotropic_share_derivatives_match_finite_differences() {
        check_family(IsotropicShare);
    }

    #[test]
    fn gamma_to_isotropic_rate_derivatives_match_finite_differences() {
        check_family(GammaToIsotropicRate);
    }

    #[test]
    fn gamma_pair_derivatives_match_finite_differences() {
        check_family(GammaPair);
    }

    #[test]
    fn kinematic_balance_derivatives_match_finite_differences() {
        check_family(KinematicBalance);
    }

    #[test]
    // Purpose
    // -------
    // Verify sums are decoded through the layout for more than two pairs:
    // a three-backstress vector contributes all three C/γ terms.
    //
    // Given
    // -----
    // - x with pairs (1000, 50), (500, 20), (300, 10); n_basic_param = 4.
    //
    // Expect
    // ------
    // - saturation-to-yield = (300 + 100 + 20 + 25 + 30) / 300.
    fn sum_families_cover_all_backstresses() {
        let x = array![193_000.0, 300.0, 100.0, 5.0, 1_000.0, 50.0, 500.0, 20.0, 300.0, 10.0];
        let layout = ParamLayout::from_len(x.len(), 4).unwrap();
        let r = SaturationToYield.ratio(x.view(), &layout).unwrap();
        assert!((r - 475.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify degenerate denominators propagate as non-finite values rather
    // than being clamped or erroring.
    //
    // Given
    // -----
    // - γ₁ = 0 at the worked point.
    //
    // Expect
    // ------
    // - The saturation-to-yield ratio is +∞.
    fn degenerate_gamma_propagates_infinity() {
        let (mut x, layout) = trial_point();
        x[5] = 0.0;
        let r = SaturationToYield.ratio(x.view(), &layout).unwrap();
        assert!(r.is_infinite());
    }
}
