// topword-stats/src/ztest/mod.rs
use libm::sqrt;

use crate::normal::two_sided_p_value;
use crate::PValue;

/// Outcome of a two-proportion z-test.
///
/// `Insignificant` is a regular result, not an error: it is produced whenever
/// the test is numerically undefined (an empty sample, or a pooled proportion
/// of exactly 0 or 1 so the standard error vanishes). `Defined` carries the
/// p-value of every computable test; comparing it to a significance level is
/// left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZTestOutcome {
    Defined(PValue),
    Insignificant,
}

impl ZTestOutcome {
    /// The p-value, if the test was defined.
    pub fn p_value(&self) -> Option<PValue> {
        match self {
            ZTestOutcome::Defined(p) => Some(*p),
            ZTestOutcome::Insignificant => None,
        }
    }

    pub fn is_insignificant(&self) -> bool {
        matches!(self, ZTestOutcome::Insignificant)
    }

    /// Total order used for ranking: ascending p-value, `Insignificant` last.
    pub fn rank_cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;
        match (self, other) {
            (ZTestOutcome::Defined(a), ZTestOutcome::Defined(b)) => a.total_cmp(b),
            (ZTestOutcome::Defined(_), ZTestOutcome::Insignificant) => Ordering::Less,
            (ZTestOutcome::Insignificant, ZTestOutcome::Defined(_)) => Ordering::Greater,
            (ZTestOutcome::Insignificant, ZTestOutcome::Insignificant) => Ordering::Equal,
        }
    }
}

/// Two-proportion z-test for a word's usage in a sample against a population.
///
/// * `p1` - proportion of the word in the sample (count / sample size).
/// * `pt` - proportion of the word in the comparison population.
/// * `n1` - total word count of the sample.
/// * `nt` - total word count of the comparison population.
///
/// Returns the two-sided p-value `(1 - Φ(|z|)) * 2` for the null hypothesis
/// that both proportions are equal.
pub fn z_test(p1: f64, pt: f64, n1: u64, nt: u64) -> ZTestOutcome {
    if n1 == 0 || nt == 0 {
        return ZTestOutcome::Insignificant;
    }

    let n1 = n1 as f64;
    let nt = nt as f64;

    let pooled = (p1 * n1 + pt * nt) / (n1 + nt);
    let standard_error = sqrt(pooled * (1.0 - pooled) * ((1.0 / n1) + (1.0 / nt)));

    // A NaN here means the pooled proportion drifted outside [0, 1].
    if !standard_error.is_finite() || standard_error == 0.0 {
        return ZTestOutcome::Insignificant;
    }

    let z_score = (p1 - pt) / standard_error;
    let p_value = two_sided_p_value(z_score);

    if p_value.is_finite() {
        ZTestOutcome::Defined(p_value.min(1.0))
    } else {
        ZTestOutcome::Insignificant
    }
}
