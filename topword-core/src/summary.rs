// topword-core/src/summary.rs
//! Descriptive statistics for tables and corpora.
//!
//! These summaries do not feed the z-tests. They help a user pick a band
//! policy and spot chunks whose size alone makes them suspicious.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use topword_stats::quartiles::index_quartiles;
use topword_stats::statistics::compute_stats;

use crate::band::{IQR_FACTOR, STDE_FACTOR};
use crate::corpus::Corpus;
use crate::table::WordFrequencyTable;

/// Distribution of per-word counts within one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub num_words: usize,
    pub total_word_count: u64,
    pub average: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl TableSummary {
    /// Returns `None` for an empty table.
    pub fn from_table(table: &WordFrequencyTable) -> Option<Self> {
        let counts: Vec<f64> = table.counts().map(|c| c as f64).collect();
        let quartiles = index_quartiles(&counts)?;
        let stats = compute_stats(&counts);

        Some(Self {
            num_words: table.num_words(),
            total_word_count: table.total(),
            average: stats.mean,
            std_dev: stats.std_dev,
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
            iqr: quartiles.iqr,
        })
    }

    /// The same figures expressed as shares of the total word count.
    pub fn as_proportions(&self) -> TableSummary {
        let total = self.total_word_count.max(1) as f64;
        TableSummary {
            average: self.average / total,
            std_dev: self.std_dev / total,
            q1: self.q1 / total,
            median: self.median / total,
            q3: self.q3 / total,
            iqr: self.iqr / total,
            ..self.clone()
        }
    }
}

/// Why a chunk's size stands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeAnomaly {
    Large,
    Small,
}

/// Chunk sizes and the chunks flagged as unusually large or small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSizeReport {
    /// Total word count per chunk, in corpus order.
    pub sizes: Vec<u64>,
    pub average: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    /// `(chunk index, anomaly)` by the mean ± 2 std dev rule.
    pub anomalies_std_dev: Vec<(usize, SizeAnomaly)>,
    /// `(chunk index, anomaly)` by the median ± 1.5 IQR rule.
    pub anomalies_iqr: Vec<(usize, SizeAnomaly)>,
}

impl ChunkSizeReport {
    /// Returns `None` for an empty corpus.
    pub fn from_corpus(corpus: &Corpus) -> Option<Self> {
        let sizes: Vec<u64> = corpus.chunks().iter().map(WordFrequencyTable::total).collect();
        let values: Vec<f64> = sizes.iter().map(|&s| s as f64).collect();
        let quartiles = index_quartiles(&values)?;
        let stats = compute_stats(&values);

        let anomalies_std_dev = classify(&values, |size| {
            if size > stats.mean + STDE_FACTOR * stats.std_dev {
                Some(SizeAnomaly::Large)
            } else if size < stats.mean - STDE_FACTOR * stats.std_dev {
                Some(SizeAnomaly::Small)
            } else {
                None
            }
        });

        let anomalies_iqr = classify(&values, |size| {
            if size > quartiles.median + IQR_FACTOR * quartiles.iqr {
                Some(SizeAnomaly::Large)
            } else if size < quartiles.median - IQR_FACTOR * quartiles.iqr {
                Some(SizeAnomaly::Small)
            } else {
                None
            }
        });

        Some(Self {
            sizes,
            average: stats.mean,
            std_dev: stats.std_dev,
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
            iqr: quartiles.iqr,
            anomalies_std_dev,
            anomalies_iqr,
        })
    }
}

fn classify<F>(values: &[f64], rule: F) -> Vec<(usize, SizeAnomaly)>
where
    F: Fn(f64) -> Option<SizeAnomaly>,
{
    values
        .iter()
        .enumerate()
        .filter_map(|(index, &size)| rule(size).map(|anomaly| (index, anomaly)))
        .collect()
}
