// File: topword-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running a whole analysis in one call (non-UI).
//!
//! Supports selecting between the corpus-wide comparison and the
//! group-vs-group comparison.

use anyhow::{bail, Result};
use chrono::Utc;
use log::info;

use crate::comparer::{corpus_band, group_band, test_all_in_band, test_group_in_band};
use crate::config::AnalysisConfig;
use crate::corpus::{group_division, Corpus};
use crate::ranking::{flatten_and_sort, flatten_group_results};
use crate::report::{corpus_fingerprint, AnalysisReport, ReportResults};

/// Enum to select which comparison to run in headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessMode {
    /// Every chunk against the whole corpus.
    CorpusWide,
    /// Every chunk of every group against every other group.
    Groups,
}

/// Runs one analysis over `corpus` and returns the ranked report. The band in
/// the report is the one the tests were gated on.
///
/// # Arguments
///
/// * `config` - The merged AnalysisConfig (defaults + optional user overrides).
/// * `corpus` - The chunk tables to analyze.
/// * `mode` - Which comparison to run. `Groups` uses `config.groups`.
pub fn headless_analyze(config: &AnalysisConfig, corpus: &Corpus, mode: HeadlessMode) -> Result<AnalysisReport> {
    config.validate()?;

    let (band, results) = match mode {
        HeadlessMode::CorpusWide => {
            let band = corpus_band(corpus, config.policy, config.low, config.high)?;
            let per_chunk = test_all_in_band(corpus, &band);
            (band, ReportResults::CorpusWide {
                ranked: flatten_and_sort(&per_chunk),
            })
        }
        HeadlessMode::Groups => {
            if config.groups.len() < 2 {
                bail!("Group analysis needs at least two groups, got {}.", config.groups.len());
            }
            let groups = group_division(corpus, &config.groups)?;
            let band = group_band(&groups, config.policy, config.low, config.high)?;
            let per_key = test_group_in_band(&groups, &band);
            (band, ReportResults::Groups {
                names: groups.iter().map(|g| g.name.clone()).collect(),
                ranked: flatten_group_results(&per_key),
            })
        }
    };

    info!("Analysis produced {} ranked entries.", results.len());

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        corpus_fingerprint: corpus_fingerprint(corpus),
        chunks: corpus.len(),
        policy: config.policy,
        band,
        significance: config.significance,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::compute_band;
    use crate::corpus::{Group, GroupSpec};
    use crate::errors::TopwordError;
    use crate::policy::{BandPolicy, BandTier};
    use crate::table::merge_tables;

    fn corpus() -> Corpus {
        Corpus::from_texts([
            "whale whale sea ship the the the",
            "the ship sailed the sea",
            "the the whale ahab ahab ahab",
        ])
    }

    #[test]
    fn test_headless_corpus_wide() -> Result<()> {
        let report = headless_analyze(&AnalysisConfig::default(), &corpus(), HeadlessMode::CorpusWide)?;
        assert_eq!(report.chunks, 3);
        let ReportResults::CorpusWide { ranked } = &report.results else {
            panic!("expected corpus-wide results");
        };
        assert!(!ranked.is_empty());
        assert!(ranked.windows(2).all(|w| w[0].p_value <= w[1].p_value));
        assert!(ranked.iter().all(|e| e.chunk >= 1 && e.chunk <= 3));
        Ok(())
    }

    #[test]
    fn test_headless_groups() -> Result<()> {
        let config = AnalysisConfig {
            groups: vec![GroupSpec::new("melville", vec![0, 2]), GroupSpec::new("other", vec![1])],
            ..Default::default()
        };
        let report = headless_analyze(&config, &corpus(), HeadlessMode::Groups)?;
        let ReportResults::Groups { names, ranked } = &report.results else {
            panic!("expected group results");
        };
        assert_eq!(names, &vec!["melville".to_string(), "other".to_string()]);
        assert!(ranked.iter().all(|e| e.source != e.target));
        Ok(())
    }

    #[test]
    fn test_headless_reports_the_gating_band() -> Result<()> {
        let corpus = corpus();
        let config = AnalysisConfig {
            policy: BandPolicy::Iqr(BandTier::Mid),
            groups: vec![GroupSpec::new("melville", vec![0, 2]), GroupSpec::new("other", vec![1])],
            ..Default::default()
        };

        let report = headless_analyze(&config, &corpus, HeadlessMode::CorpusWide)?;
        let expected = compute_band(&corpus.merged(), config.policy, 0.0, 1.0)?;
        assert_eq!(report.band, expected);
        let ReportResults::CorpusWide { ranked } = &report.results else {
            panic!("expected corpus-wide results");
        };
        let merged = corpus.merged();
        assert!(ranked.iter().all(|e| report.band.contains(merged.proportion(&e.word))));

        let report = headless_analyze(&config, &corpus, HeadlessMode::Groups)?;
        let groups = group_division(&corpus, &config.groups)?;
        let tables: Vec<_> = groups.iter().map(Group::merged).collect();
        assert_eq!(report.band, compute_band(&merge_tables(&tables), config.policy, 0.0, 1.0)?);
        Ok(())
    }

    #[test]
    fn test_headless_groups_needs_two_groups() {
        let config = AnalysisConfig {
            groups: vec![GroupSpec::new("solo", vec![0])],
            ..Default::default()
        };
        assert!(headless_analyze(&config, &corpus(), HeadlessMode::Groups).is_err());
    }

    #[test]
    fn test_headless_duplicate_groups_surface_typed_error() {
        let config = AnalysisConfig {
            groups: vec![GroupSpec::new("x", vec![0, 1]), GroupSpec::new("y", vec![0, 1])],
            ..Default::default()
        };
        let err = headless_analyze(&config, &corpus(), HeadlessMode::Groups).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TopwordError>(),
            Some(TopwordError::DuplicateGroup { .. })
        ));
    }
}
