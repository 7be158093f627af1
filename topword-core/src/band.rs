// topword-core/src/band.rs
//! Outlier band selection.
//!
//! Before any word is tested, a band of whole-scope proportions is computed
//! from the merged word-frequency table. Only words whose proportion lies
//! strictly inside `(low, high)` are tested; this keeps extremely rare or
//! extremely common words out of the rankings when the caller asks for it.
//!
//! The statistics-based policies scale their cut-offs in two different ways:
//!
//! * the standard-error family divides its cut-offs by the vocabulary size,
//!   using a spread of `sqrt(Σ(c - mean)²) / n`;
//! * the IQR family divides its cut-offs by the total word count.
//!
//! `CustomF` likewise converts raw counts by dividing by the vocabulary size.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};

use topword_stats::quartiles::index_quartiles;
use topword_stats::statistics::band_spread;

use crate::errors::{TopwordError, TopwordResult};
use crate::policy::{BandPolicy, BandTier};
use crate::table::WordFrequencyTable;

/// Multiplier on the spread for the standard-error policies.
pub const STDE_FACTOR: f64 = 2.0;
/// Multiplier on the IQR for the IQR policies.
pub const IQR_FACTOR: f64 = 1.5;

/// Open interval of proportions eligible for testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBand {
    pub low: f64,
    pub high: f64,
}

impl OutlierBand {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `low < proportion < high`, both bounds exclusive.
    pub fn contains(&self, proportion: f64) -> bool {
        self.low < proportion && proportion < self.high
    }
}

impl Default for OutlierBand {
    fn default() -> Self {
        Self { low: 0.0, high: 1.0 }
    }
}

/// Computes the band for `policy` over a merged table.
///
/// `low` and `high` are the caller's bounds. Custom policies transform them;
/// statistics-based policies overwrite whichever bound their tier sets and
/// keep the other one.
pub fn compute_band(
    merged: &WordFrequencyTable,
    policy: BandPolicy,
    low: f64,
    high: f64,
) -> TopwordResult<OutlierBand> {
    let band = match policy {
        BandPolicy::CustomP => OutlierBand::new(low, high),
        BandPolicy::CustomF => {
            let num_words = non_empty_vocabulary(merged)?;
            OutlierBand::new(low / num_words, high / num_words)
        }
        BandPolicy::StdE(tier) => {
            let num_words = non_empty_vocabulary(merged)?;
            let counts: Vec<f64> = merged.counts().map(|c| c as f64).collect();
            let average = merged.total() as f64 / num_words;
            let spread = band_spread(&counts, average);
            debug!(
                "StdE band statistics: average={}, spread={}, words={}",
                average, spread, num_words
            );

            let upper = (average + STDE_FACTOR * spread) / num_words;
            let lower = (average - STDE_FACTOR * spread) / num_words;
            apply_tier(tier, low, high, lower, upper)
        }
        BandPolicy::Iqr(tier) => {
            non_empty_vocabulary(merged)?;
            if merged.total() == 0 {
                return Err(TopwordError::EmptyCorpus);
            }
            let counts: Vec<f64> = merged.counts().map(|c| c as f64).collect();
            let quartiles = index_quartiles(&counts).ok_or(TopwordError::EmptyCorpus)?;
            let total = merged.total() as f64;
            debug!(
                "IQR band statistics: median={}, q1={}, q3={}, iqr={}",
                quartiles.median, quartiles.q1, quartiles.q3, quartiles.iqr
            );

            let upper = (quartiles.median + IQR_FACTOR * quartiles.iqr) / total;
            let lower = (quartiles.median - IQR_FACTOR * quartiles.iqr) / total;
            apply_tier(tier, low, high, lower, upper)
        }
    };

    debug!(
        "Band for policy {}: ({}, {})",
        policy, band.low, band.high
    );
    Ok(band)
}

fn apply_tier(tier: BandTier, low: f64, high: f64, lower: f64, upper: f64) -> OutlierBand {
    match tier {
        BandTier::Top => OutlierBand::new(upper, high),
        BandTier::Mid => OutlierBand::new(lower, upper),
        BandTier::Low => OutlierBand::new(low, lower),
    }
}

fn non_empty_vocabulary(merged: &WordFrequencyTable) -> TopwordResult<f64> {
    if merged.is_empty() {
        return Err(TopwordError::EmptyCorpus);
    }
    Ok(merged.num_words() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn five_words() -> WordFrequencyTable {
        [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 40)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_custom_p_passes_through() {
        let band = compute_band(&five_words(), BandPolicy::CustomP, 0.1, 0.9).unwrap();
        assert_eq!(band, OutlierBand::new(0.1, 0.9));
    }

    #[test]
    fn test_custom_p_allows_empty_table() {
        let band = compute_band(&WordFrequencyTable::new(), BandPolicy::CustomP, 0.0, 1.0).unwrap();
        assert_eq!(band, OutlierBand::default());
    }

    #[test]
    fn test_custom_f_divides_by_vocabulary_size() {
        let band = compute_band(&five_words(), BandPolicy::CustomF, 0.0, 10.0).unwrap();
        assert_eq!(band.low, 0.0);
        assert!((band.high - 2.0).abs() < EPSILON);
        assert!((band.high - 10.0 / 50.0).abs() > 1.0);
    }

    #[test]
    fn test_stde_bounds() {
        let merged = five_words();
        let average = 50.0 / 5.0;
        let ss: f64 = [1.0f64, 2.0, 3.0, 4.0, 40.0]
            .iter()
            .map(|c| (c - average).powi(2))
            .sum();
        let spread = ss.sqrt() / 5.0;

        let top = compute_band(&merged, BandPolicy::StdE(BandTier::Top), 0.0, 1.0).unwrap();
        assert!((top.low - (average + 2.0 * spread) / 5.0).abs() < EPSILON);
        assert_eq!(top.high, 1.0);

        let mid = compute_band(&merged, BandPolicy::StdE(BandTier::Mid), 0.0, 1.0).unwrap();
        assert!((mid.high - (average + 2.0 * spread) / 5.0).abs() < EPSILON);
        assert!((mid.low - (average - 2.0 * spread) / 5.0).abs() < EPSILON);

        let low = compute_band(&merged, BandPolicy::StdE(BandTier::Low), 0.0, 1.0).unwrap();
        assert_eq!(low.low, 0.0);
        assert!((low.high - (average - 2.0 * spread) / 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_iqr_bounds_use_total_word_count() {
        // Sorted counts 1 2 3 4 40: median = s[2] = 3, q1 = s[1] = 2, q3 = s[3] = 4.
        let merged = five_words();
        let top = compute_band(&merged, BandPolicy::Iqr(BandTier::Top), 0.0, 1.0).unwrap();
        assert!((top.low - (3.0 + 1.5 * 2.0) / 50.0).abs() < EPSILON);

        let mid = compute_band(&merged, BandPolicy::Iqr(BandTier::Mid), 0.0, 1.0).unwrap();
        assert!((mid.low - (3.0 - 3.0) / 50.0).abs() < EPSILON);
        assert!((mid.high - 6.0 / 50.0).abs() < EPSILON);

        let low = compute_band(&merged, BandPolicy::Iqr(BandTier::Low), 0.0, 1.0).unwrap();
        assert!((low.high - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_band_monotonicity() {
        let merged: WordFrequencyTable = [("a", 3), ("b", 9), ("c", 1), ("d", 27), ("e", 2), ("f", 5), ("g", 11)]
            .into_iter()
            .collect();
        for family in [BandPolicy::StdE as fn(BandTier) -> BandPolicy, BandPolicy::Iqr] {
            let top = compute_band(&merged, family(BandTier::Top), 0.0, 1.0).unwrap();
            let mid = compute_band(&merged, family(BandTier::Mid), 0.0, 1.0).unwrap();
            let low = compute_band(&merged, family(BandTier::Low), 0.0, 1.0).unwrap();
            assert!(top.low >= mid.low);
            assert!(mid.low >= low.high);
        }
    }

    #[test]
    fn test_statistics_policies_reject_empty_table() {
        let empty = WordFrequencyTable::new();
        for policy in [
            BandPolicy::CustomF,
            BandPolicy::StdE(BandTier::Mid),
            BandPolicy::Iqr(BandTier::Top),
        ] {
            assert!(matches!(
                compute_band(&empty, policy, 0.0, 1.0),
                Err(TopwordError::EmptyCorpus)
            ));
        }
    }

    #[test]
    fn test_band_is_open_interval() {
        let band = OutlierBand::new(0.1, 0.5);
        assert!(!band.contains(0.1));
        assert!(band.contains(0.3));
        assert!(!band.contains(0.5));
    }
}
