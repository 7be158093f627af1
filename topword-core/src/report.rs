// topword-core/src/report.rs
//! Serializable analysis reports.
//!
//! License: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::band::OutlierBand;
use crate::corpus::Corpus;
use crate::policy::BandPolicy;
use crate::ranking::{RankedEntry, RankedGroupEntry};

/// Ranked rows of either analysis mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReportResults {
    CorpusWide {
        ranked: Vec<RankedEntry>,
    },
    Groups {
        /// Group names, indexed by the `source`/`target` of each entry.
        names: Vec<String>,
        ranked: Vec<RankedGroupEntry>,
    },
}

impl ReportResults {
    pub fn len(&self) -> usize {
        match self {
            ReportResults::CorpusWide { ranked } => ranked.len(),
            ReportResults::Groups { ranked, .. } => ranked.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a reporting layer needs to render or archive one run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the corpus contents, see [`corpus_fingerprint`].
    pub corpus_fingerprint: String,
    pub chunks: usize,
    pub policy: BandPolicy,
    pub band: OutlierBand,
    pub significance: f64,
    pub results: ReportResults,
}

impl AnalysisReport {
    /// Number of ranked rows below the significance level.
    pub fn significant_count(&self) -> usize {
        let below = |p: f64| p < self.significance;
        match &self.results {
            ReportResults::CorpusWide { ranked } => ranked.iter().filter(|e| below(e.p_value)).count(),
            ReportResults::Groups { ranked, .. } => ranked.iter().filter(|e| below(e.p_value)).count(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Hex SHA-256 over every chunk's `word\tcount` lines, chunks separated by a
/// blank line. Identical corpora give identical fingerprints regardless of
/// how the tables were built.
pub fn corpus_fingerprint(corpus: &Corpus) -> String {
    let mut hasher = Sha256::new();
    for chunk in corpus.chunks() {
        for (word, count) in chunk {
            hasher.update(word.as_bytes());
            hasher.update(b"\t");
            hasher.update(count.to_string().as_bytes());
            hasher.update(b"\n");
        }
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
