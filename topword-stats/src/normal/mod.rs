// topword-stats/src/normal/mod.rs
use libm::{erfc, fabs};

const SQRT_2: f64 = core::f64::consts::SQRT_2;

/// Cumulative distribution function of the standard normal distribution.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Two-sided tail probability `(1 - Φ(|z|)) * 2`.
///
/// Computed through `erfc` directly so that small p-values in the far tail
/// do not cancel to zero.
pub fn two_sided_p_value(z: f64) -> f64 {
    erfc(fabs(z) / SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_cdf_at_zero_is_half() {
        assert!((normal_cdf(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.0, 1.96, 3.0] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_two_sided_matches_cdf() {
        // 1.959963984540054 is the 97.5th percentile.
        let p = two_sided_p_value(1.959963984540054);
        assert!((p - 0.05).abs() < 1e-9);
        let z = 0.7;
        assert!((two_sided_p_value(z) - (1.0 - normal_cdf(z)) * 2.0).abs() < EPSILON);
        assert_eq!(two_sided_p_value(-z), two_sided_p_value(z));
    }

    #[test]
    fn test_far_tail_stays_positive() {
        let p = two_sided_p_value(12.0);
        assert!(p > 0.0 && p < 1e-30);
    }
}
