// topword-core/src/comparer.rs
//! Corpus-wide and group-vs-group comparisons.
//!
//! Both comparers run the two-proportion z-test for every eligible word of
//! every chunk and return per-chunk lists sorted ascending by p-value, with
//! insignificant results kept at the end of each list.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use topword_stats::{z_test, ZTestOutcome};

use crate::band::{compute_band, OutlierBand};
use crate::corpus::{Corpus, Group};
use crate::errors::TopwordResult;
use crate::policy::BandPolicy;
use crate::table::{merge_tables, WordFrequencyTable};

/// The z-test outcome for one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordResult {
    pub word: String,
    #[serde(rename = "p_value", serialize_with = "serialize_outcome")]
    pub outcome: ZTestOutcome,
}

impl WordResult {
    pub fn new(word: impl Into<String>, outcome: ZTestOutcome) -> Self {
        Self {
            word: word.into(),
            outcome,
        }
    }

    pub fn p_value(&self) -> Option<f64> {
        self.outcome.p_value()
    }
}

/// Writes a p-value as a number and an undefined test as `"Insignificant"`.
fn serialize_outcome<S: Serializer>(outcome: &ZTestOutcome, serializer: S) -> Result<S::Ok, S::Error> {
    match outcome {
        ZTestOutcome::Defined(p) => serializer.serialize_f64(*p),
        ZTestOutcome::Insignificant => serializer.serialize_str("Insignificant"),
    }
}

/// Results for one chunk (or one chunk against one group), sorted ascending
/// by p-value.
pub type RankedResultList = Vec<WordResult>;

/// Identifies one group comparison: chunk `chunk` of group `source`,
/// tested against the merged usage of group `target`. All indices are
/// 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupKey {
    pub source: usize,
    pub chunk: usize,
    pub target: usize,
}

/// Group comparison results, ordered by key.
pub type GroupResults = BTreeMap<GroupKey, RankedResultList>;

/// Stable sort by p-value, insignificant last.
pub fn sort_results(results: &mut RankedResultList) {
    results.sort_by(|a, b| a.outcome.rank_cmp(&b.outcome));
}

/// The band `test_all` gates on: computed from the merged usage of the whole
/// corpus.
pub fn corpus_band(corpus: &Corpus, policy: BandPolicy, low: f64, high: f64) -> TopwordResult<OutlierBand> {
    compute_band(&corpus.merged(), policy, low, high)
}

/// Tests every chunk of the corpus against the merged usage of the whole
/// corpus.
///
/// A word of a chunk is tested only if its whole-corpus proportion lies
/// strictly inside the band computed for `policy`. Returns one ranked list
/// per chunk, in corpus order.
pub fn test_all(
    corpus: &Corpus,
    policy: BandPolicy,
    low: f64,
    high: f64,
) -> TopwordResult<Vec<RankedResultList>> {
    let band = corpus_band(corpus, policy, low, high)?;
    info!("Testing {} chunks against the whole corpus, policy {}.", corpus.len(), policy);
    Ok(test_all_in_band(corpus, &band))
}

/// [`test_all`] with the band already computed.
pub fn test_all_in_band(corpus: &Corpus, band: &OutlierBand) -> Vec<RankedResultList> {
    let merged = corpus.merged();
    debug!(
        "Corpus has {} words, {} distinct; band {}..{}.",
        merged.total(),
        merged.num_words(),
        band.low,
        band.high
    );

    corpus
        .chunks()
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let results = test_chunk_against_corpus(chunk, &merged, band);
            debug!("Chunk {}: {} words tested.", index, results.len());
            results
        })
        .collect()
}

fn test_chunk_against_corpus(
    chunk: &WordFrequencyTable,
    merged: &WordFrequencyTable,
    band: &OutlierBand,
) -> RankedResultList {
    let chunk_total = chunk.total();
    let corpus_total = merged.total();

    let mut results: RankedResultList = chunk
        .iter()
        .filter_map(|(word, &count)| {
            let corpus_proportion = merged.proportion(word);
            if !band.contains(corpus_proportion) {
                return None;
            }
            let chunk_proportion = ratio(count, chunk_total);
            let outcome = z_test(chunk_proportion, corpus_proportion, chunk_total, corpus_total);
            Some(WordResult::new(word.clone(), outcome))
        })
        .collect();

    sort_results(&mut results);
    results
}

/// The band `test_group` gates on: computed once from every group's merged
/// table merged together, never from a single group.
pub fn group_band(groups: &[Group], policy: BandPolicy, low: f64, high: f64) -> TopwordResult<OutlierBand> {
    let group_tables: Vec<WordFrequencyTable> = groups.iter().map(Group::merged).collect();
    compute_band(&merge_tables(&group_tables), policy, low, high)
}

/// Tests every chunk of every group against the merged usage of every other
/// group.
///
/// The band is computed once over all groups merged together. A word is
/// tested when its proportion inside its own chunk lies strictly inside the
/// band; its proportion in the target group is zero when the target never
/// uses it.
pub fn test_group(
    groups: &[Group],
    policy: BandPolicy,
    low: f64,
    high: f64,
) -> TopwordResult<GroupResults> {
    let band = group_band(groups, policy, low, high)?;
    info!("Testing {} groups pairwise, policy {}.", groups.len(), policy);
    Ok(test_group_in_band(groups, &band))
}

/// [`test_group`] with the band already computed.
pub fn test_group_in_band(groups: &[Group], band: &OutlierBand) -> GroupResults {
    let group_tables: Vec<WordFrequencyTable> = groups.iter().map(Group::merged).collect();
    debug!("Band {}..{} over {} groups.", band.low, band.high, groups.len());

    let mut all_results = GroupResults::new();

    for (source, group) in groups.iter().enumerate() {
        for (target, target_table) in group_tables.iter().enumerate() {
            if source == target {
                continue;
            }
            for (chunk_number, chunk) in group.chunks.iter().enumerate() {
                let mut results = test_chunk_against_group(chunk, target_table, band);
                if results.is_empty() {
                    continue;
                }
                sort_results(&mut results);
                debug!(
                    "Group {} chunk {} vs group {}: {} words tested.",
                    source,
                    chunk_number,
                    target,
                    results.len()
                );
                all_results.insert(
                    GroupKey {
                        source,
                        chunk: chunk_number,
                        target,
                    },
                    results,
                );
            }
        }
    }

    all_results
}

fn test_chunk_against_group(
    chunk: &WordFrequencyTable,
    target: &WordFrequencyTable,
    band: &OutlierBand,
) -> RankedResultList {
    let chunk_total = chunk.total();
    let target_total = target.total();

    chunk
        .iter()
        .filter_map(|(word, &count)| {
            let chunk_proportion = ratio(count, chunk_total);
            if !band.contains(chunk_proportion) {
                return None;
            }
            let target_proportion = target.proportion(word);
            let outcome = z_test(chunk_proportion, target_proportion, chunk_total, target_total);
            Some(WordResult::new(word.clone(), outcome))
        })
        .collect()
}

fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{group_division, GroupSpec};
    use crate::policy::BandTier;

    fn two_chunks() -> Corpus {
        Corpus::new(vec![
            [("a", 10), ("b", 5)].into_iter().collect(),
            [("a", 2), ("b", 20)].into_iter().collect(),
        ])
    }

    #[test]
    fn test_all_two_chunk_scenario() {
        let results = test_all(&two_chunks(), BandPolicy::CustomP, 0.0, 1.0).unwrap();
        assert_eq!(results.len(), 2);

        let a = results[0].iter().find(|r| r.word == "a").unwrap();
        let expected = z_test(10.0 / 15.0, 12.0 / 37.0, 15, 37);
        assert_eq!(a.outcome, expected);
    }

    #[test]
    fn test_all_lists_are_sorted() {
        let corpus = Corpus::from_texts([
            "the cat sat on the mat the end",
            "a dog ran past the cat and the dog barked dog dog",
            "the end of the story is the end",
        ]);
        let results = test_all(&corpus, BandPolicy::CustomP, 0.0, 1.0).unwrap();
        for list in &results {
            for pair in list.windows(2) {
                assert!(pair[0].outcome.rank_cmp(&pair[1].outcome).is_le());
            }
        }
    }

    #[test]
    fn test_all_respects_band() {
        let corpus = two_chunks();
        // 'a' has corpus proportion 12/37 ~ 0.32, 'b' has 25/37 ~ 0.68.
        let results = test_all(&corpus, BandPolicy::CustomP, 0.5, 1.0).unwrap();
        for list in &results {
            assert!(list.iter().all(|r| r.word == "b"));
            assert_eq!(list.len(), 1);
        }
    }

    #[test]
    fn test_all_band_bounds_are_exclusive() {
        let corpus = Corpus::new(vec![[("x", 1), ("y", 1)].into_iter().collect()]);
        // Both words have corpus proportion exactly 0.5.
        let results = test_all(&corpus, BandPolicy::CustomP, 0.5, 1.0).unwrap();
        assert!(results[0].is_empty());
    }

    #[test]
    fn test_all_single_chunk_matches_itself() {
        let corpus = Corpus::from_texts(["one two two three three three"]);
        let results = test_all(&corpus, BandPolicy::CustomP, 0.0, 1.0).unwrap();
        for r in &results[0] {
            assert!((r.p_value().unwrap() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_all_unknown_policy_never_reaches_testing() {
        let err = "Bogus".parse::<BandPolicy>().unwrap_err();
        assert!(err.to_string().contains("Bogus"));
    }

    #[test]
    fn test_all_stde_top_filters_common_words_only() {
        let corpus = Corpus::from_texts([
            "the the the the the a b c d e",
            "the the the the f g h i j k",
        ]);
        let results = test_all(&corpus, BandPolicy::StdE(BandTier::Top), 0.0, 1.0).unwrap();
        for list in &results {
            assert!(list.iter().all(|r| r.word == "the"));
        }
    }

    #[test]
    fn test_group_keys_and_missing_words() {
        let corpus = Corpus::new(vec![
            [("a", 5), ("b", 5)].into_iter().collect(),
            [("a", 4), ("b", 6)].into_iter().collect(),
            [("b", 9), ("c", 1)].into_iter().collect(),
        ]);
        let specs = GroupSpec::from_index_lists(&[vec![0, 1], vec![2]]);
        let groups = group_division(&corpus, &specs).unwrap();
        let results = test_group(&groups, BandPolicy::CustomP, 0.0, 1.0).unwrap();

        let keys: Vec<GroupKey> = results.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                GroupKey { source: 0, chunk: 0, target: 1 },
                GroupKey { source: 0, chunk: 1, target: 1 },
                GroupKey { source: 1, chunk: 0, target: 0 },
            ]
        );

        // 'a' never appears in group 1: tested against a zero proportion.
        let list = &results[&GroupKey { source: 0, chunk: 0, target: 1 }];
        let a = list.iter().find(|r| r.word == "a").unwrap();
        assert_eq!(a.outcome, z_test(0.5, 0.0, 10, 10));
        assert!(a.p_value().unwrap() < 0.05);

        // 'c' never appears in group 0.
        let list = &results[&GroupKey { source: 1, chunk: 0, target: 0 }];
        let c = list.iter().find(|r| r.word == "c").unwrap();
        assert_eq!(c.outcome, z_test(0.1, 0.0, 10, 20));
    }

    #[test]
    fn test_group_gates_on_chunk_proportion() {
        let corpus = Corpus::new(vec![
            [("a", 9), ("b", 1)].into_iter().collect(),
            [("a", 1), ("b", 9)].into_iter().collect(),
        ]);
        let specs = GroupSpec::from_index_lists(&[vec![0], vec![1]]);
        let groups = group_division(&corpus, &specs).unwrap();
        let results = test_group(&groups, BandPolicy::CustomP, 0.5, 1.0).unwrap();

        let first = &results[&GroupKey { source: 0, chunk: 0, target: 1 }];
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].word, "a");
        let second = &results[&GroupKey { source: 1, chunk: 0, target: 0 }];
        assert_eq!(second[0].word, "b");
    }

    #[test]
    fn test_word_result_serializes_sentinel() {
        let r = WordResult::new("w", ZTestOutcome::Insignificant);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"word":"w","p_value":"Insignificant"}"#);
        let r = WordResult::new("w", ZTestOutcome::Defined(0.5));
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"word":"w","p_value":0.5}"#);
    }
}
