//! LMS z-scores and percentile conversion
//!
//! Formulas follow Cole & Green: a Box-Cox transform with power `L`, median
//! `M` and coefficient of variation `S` maps a skewed measurement onto a
//! standard normal scale.

use crate::reference::LmsParams;

/// Z-scores beyond this magnitude are pinned to the 0th / 100th percentile
pub const Z_CLAMP: f64 = 6.0;

// Coefficients of the logistic surrogate for the standard normal CDF
const CDF_LINEAR: f64 = 0.717;
const CDF_QUADRATIC: f64 = 0.416;

/// Standard normal quantiles for the percentile lines drawn on growth charts
pub const CHART_PERCENTILES: [(u8, f64); 7] = [
    (3, -1.8808),
    (10, -1.2816),
    (25, -0.6745),
    (50, 0.0),
    (75, 0.6745),
    (90, 1.2816),
    (97, 1.8808),
];

/// Calculate the LMS z-score of measurement `x`
///
/// L = 0: Z = ln(X/M) / S
/// otherwise: Z = ((X/M)^L - 1) / (L × S)
///
/// `x` must be positive. Zero or negative values yield a non-finite result;
/// [`calculate_percentiles`](crate::calculate_percentiles) rejects them first.
pub fn z_score(x: f64, lms: &LmsParams) -> f64 {
    let ratio = x / lms.m;
    if lms.l == 0.0 {
        ratio.ln() / lms.s
    } else {
        (ratio.powf(lms.l) - 1.0) / (lms.l * lms.s)
    }
}

/// Inverse of [`z_score`]: the measurement that sits at `z`
///
/// L = 0: X = M × exp(S × Z)
/// otherwise: X = M × (1 + L × S × Z)^(1/L)
pub fn value_at_z(z: f64, lms: &LmsParams) -> f64 {
    if lms.l == 0.0 {
        lms.m * (lms.s * z).exp()
    } else {
        lms.m * (1.0 + lms.l * lms.s * z).powf(1.0 / lms.l)
    }
}

/// Approximate probability that a standard normal variable is at most `z`
///
/// Upper half: 1 − 0.5 × exp(−0.717·Z − 0.416·Z²). The lower half is its
/// mirror image, so P(−z) = 1 − P(z) and the curve stays in [0, 1].
///
/// Negative z-scores therefore do not match the legacy widget, which used
/// 0.5 × exp(0.717·Z + 0.416·Z²) below zero: Z = −0.5 reports the 31st
/// percentile here where the widget showed 39. Results for Z ≥ 0 are
/// unchanged.
pub fn approximate_normal_cdf(z: f64) -> f64 {
    let tail = |z: f64| 0.5 * (-CDF_LINEAR * z - CDF_QUADRATIC * z * z).exp();
    if z < 0.0 {
        tail(-z)
    } else {
        1.0 - tail(z)
    }
}

/// Map a z-score to a whole percentile in `[0, 100]`
pub fn z_score_to_percentile(z: f64) -> u8 {
    if z < -Z_CLAMP {
        return 0;
    }
    if z > Z_CLAMP {
        return 100;
    }
    let p = approximate_normal_cdf(z);
    (p * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Look up the z-score of a standard chart percentile line
pub fn chart_percentile_z(percentile: u8) -> Option<f64> {
    CHART_PERCENTILES
        .iter()
        .find(|(p, _)| *p == percentile)
        .map(|(_, z)| *z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const HEIGHT_MALE_5Y: LmsParams = LmsParams::new(1.0, 109.9, 0.03848);
    const WEIGHT_MALE_5Y: LmsParams = LmsParams::new(-0.4374, 18.4, 0.12713);

    #[test]
    fn test_median_gives_zero() {
        assert_eq!(z_score(109.9, &HEIGHT_MALE_5Y), 0.0);
        assert_eq!(z_score(18.4, &WEIGHT_MALE_5Y), 0.0);
        assert_eq!(z_score(12.0, &LmsParams::new(0.0, 12.0, 0.1)), 0.0);
        assert_eq!(z_score_to_percentile(0.0), 50);
    }

    #[test]
    fn test_log_branch() {
        let lms = LmsParams::new(0.0, 10.0, 0.1);
        let z = z_score(10.0 * std::f64::consts::E, &lms);
        assert!((z - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_power_branch() {
        // L = 1 reduces to (X - M) / (M × S)
        let z = z_score(113.0, &HEIGHT_MALE_5Y);
        let expected = (113.0 - 109.9) / (109.9 * 0.03848);
        assert!((z - expected).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_measurement_is_not_finite() {
        let lms = LmsParams::new(0.0, 10.0, 0.1);
        assert!(!z_score(0.0, &lms).is_finite());
        assert!(!z_score(-1.0, &lms).is_finite());
    }

    #[rstest]
    #[case(-7.0, 0)]
    #[case(-6.5, 0)]
    #[case(7.0, 100)]
    #[case(6.5, 100)]
    #[case(-6.0, 0)]
    #[case(6.0, 100)]
    fn test_clamp_boundaries(#[case] z: f64, #[case] expected: u8) {
        assert_eq!(z_score_to_percentile(z), expected);
    }

    #[rstest]
    #[case(1.0, 84)]
    #[case(-1.0, 16)]
    #[case(2.0, 98)]
    #[case(-2.0, 2)]
    #[case(0.5, 69)]
    #[case(-0.5, 31)]
    fn test_known_percentiles(#[case] z: f64, #[case] expected: u8) {
        assert_eq!(z_score_to_percentile(z), expected);
    }

    #[test]
    fn test_chart_percentile_lookup() {
        assert_eq!(chart_percentile_z(50), Some(0.0));
        assert_eq!(chart_percentile_z(97), Some(1.8808));
        assert_eq!(chart_percentile_z(42), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: percentile never decreases as the measurement grows
        #[test]
        fn prop_percentile_monotonic(a in 8.0f64..40.0, b in 8.0f64..40.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = z_score_to_percentile(z_score(lo, &WEIGHT_MALE_5Y));
            let p_hi = z_score_to_percentile(z_score(hi, &WEIGHT_MALE_5Y));
            prop_assert!(p_lo <= p_hi, "{} -> {}, {} -> {}", lo, p_lo, hi, p_hi);
        }

        /// Property: the CDF surrogate is symmetric and bounded
        #[test]
        fn prop_cdf_symmetric(z in -6.0f64..6.0) {
            let p = approximate_normal_cdf(z);
            prop_assert!((0.0..=1.0).contains(&p));
            prop_assert!((p + approximate_normal_cdf(-z) - 1.0).abs() < 1e-12);
        }

        /// Property: value_at_z inverts z_score
        #[test]
        fn prop_value_at_z_inverts(z in -3.0f64..3.0) {
            for lms in [HEIGHT_MALE_5Y, WEIGHT_MALE_5Y, LmsParams::new(0.0, 12.0, 0.1)] {
                let x = value_at_z(z, &lms);
                prop_assert!((z_score(x, &lms) - z).abs() < 1e-9);
            }
        }
    }
}
