// topword-core/src/ranking.rs
//! Flattening per-chunk results into one ranked report.
//!
//! Insignificant results are dropped here and only here: per-chunk lists keep
//! them (at the end) so callers can still see which words were untestable.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::comparer::{GroupKey, GroupResults, RankedResultList};

/// One row of a corpus-wide report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based chunk number.
    pub chunk: usize,
    pub word: String,
    pub p_value: f64,
}

/// One row of a group report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedGroupEntry {
    /// 0-based index of the group the chunk belongs to.
    pub source: usize,
    /// 0-based position of the chunk inside its group.
    pub chunk: usize,
    /// 0-based index of the group it was compared against.
    pub target: usize,
    pub word: String,
    pub p_value: f64,
}

/// Merges every chunk's results into a single list sorted ascending by
/// p-value, most anomalous first.
///
/// Chunks are numbered from 1. Entries whose test was insignificant are
/// dropped. Ties keep chunk order, then the order within each chunk.
pub fn flatten_and_sort(per_chunk: &[RankedResultList]) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = per_chunk
        .iter()
        .enumerate()
        .flat_map(|(index, results)| {
            results.iter().filter_map(move |result| {
                result.p_value().map(|p_value| RankedEntry {
                    chunk: index + 1,
                    word: result.word.clone(),
                    p_value,
                })
            })
        })
        .collect();

    entries.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
    entries
}

/// Same as [`flatten_and_sort`] for group comparisons, keeping each entry's
/// [`GroupKey`].
pub fn flatten_group_results(results: &GroupResults) -> Vec<RankedGroupEntry> {
    let mut entries: Vec<RankedGroupEntry> = results
        .iter()
        .flat_map(|(key, list)| {
            let GroupKey { source, chunk, target } = *key;
            list.iter().filter_map(move |result| {
                result.p_value().map(|p_value| RankedGroupEntry {
                    source,
                    chunk,
                    target,
                    word: result.word.clone(),
                    p_value,
                })
            })
        })
        .collect();

    entries.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::WordResult;
    use topword_stats::ZTestOutcome::{Defined, Insignificant};

    #[test]
    fn test_flatten_drops_insignificant_and_sorts() {
        let per_chunk = vec![
            vec![
                WordResult::new("a", Defined(0.2)),
                WordResult::new("b", Insignificant),
            ],
            vec![
                WordResult::new("c", Defined(0.01)),
                WordResult::new("d", Defined(0.9)),
                WordResult::new("e", Insignificant),
            ],
        ];

        let flat = flatten_and_sort(&per_chunk);
        let words: Vec<&str> = flat.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["c", "a", "d"]);
        assert_eq!(flat[0].chunk, 2);
        assert_eq!(flat[1].chunk, 1);
    }

    #[test]
    fn test_flatten_ties_keep_chunk_order() {
        let per_chunk = vec![
            vec![WordResult::new("x", Defined(0.5))],
            vec![WordResult::new("y", Defined(0.5))],
        ];
        let flat = flatten_and_sort(&per_chunk);
        assert_eq!(flat[0].word, "x");
        assert_eq!(flat[1].word, "y");
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_and_sort(&[]).is_empty());
        assert!(flatten_and_sort(&[vec![WordResult::new("z", Insignificant)]]).is_empty());
    }

    #[test]
    fn test_flatten_group_results() {
        let mut results = GroupResults::new();
        results.insert(
            GroupKey { source: 1, chunk: 0, target: 0 },
            vec![WordResult::new("q", Defined(0.03)), WordResult::new("r", Insignificant)],
        );
        results.insert(
            GroupKey { source: 0, chunk: 2, target: 1 },
            vec![WordResult::new("p", Defined(0.3))],
        );

        let flat = flatten_group_results(&results);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].word, "q");
        assert_eq!((flat[0].source, flat[0].chunk, flat[0].target), (1, 0, 0));
        assert_eq!(flat[1].chunk, 2);
    }
}
