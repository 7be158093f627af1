// topword-core/src/corpus.rs
//! Corpora and named groups of chunks.
//!
//! License: MIT OR Apache-2.0

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::errors::{TopwordError, TopwordResult};
use crate::table::{merge_tables, WordFrequencyTable};

/// Ordered sequence of chunk tables. The position of a table is its chunk
/// identity in every report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    chunks: Vec<WordFrequencyTable>,
}

impl Corpus {
    pub fn new(chunks: Vec<WordFrequencyTable>) -> Self {
        Self { chunks }
    }

    /// Tokenizes each text into its own chunk.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|text| WordFrequencyTable::from_text(text.as_ref()))
                .collect(),
        )
    }

    pub fn chunks(&self) -> &[WordFrequencyTable] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordFrequencyTable> {
        self.chunks.get(index)
    }

    /// Whole-corpus table.
    pub fn merged(&self) -> WordFrequencyTable {
        merge_tables(&self.chunks)
    }
}

impl From<Vec<WordFrequencyTable>> for Corpus {
    fn from(chunks: Vec<WordFrequencyTable>) -> Self {
        Self::new(chunks)
    }
}

/// User definition of a group: a label and the chunk indices it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    pub chunks: Vec<usize>,
}

impl GroupSpec {
    pub fn new(name: impl Into<String>, chunks: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            chunks,
        }
    }

    /// Names plain index lists `group 0`, `group 1`, ...
    pub fn from_index_lists(lists: &[Vec<usize>]) -> Vec<GroupSpec> {
        lists
            .iter()
            .enumerate()
            .map(|(i, chunks)| GroupSpec::new(format!("group {}", i), chunks.clone()))
            .collect()
    }

    /// Member indices in ascending order, repeats kept. A repeated index
    /// counts its chunk twice in the merged table.
    fn sorted_indices(&self) -> Vec<usize> {
        let mut indices = self.chunks.clone();
        indices.sort_unstable();
        indices
    }
}

/// A group with its chunk tables resolved against a corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    /// Corpus indices of the member chunks, in definition order.
    pub indices: Vec<usize>,
    pub chunks: Vec<WordFrequencyTable>,
}

impl Group {
    /// All member chunks merged together.
    pub fn merged(&self) -> WordFrequencyTable {
        merge_tables(&self.chunks)
    }
}

/// Checks the group definitions and resolves them against `corpus`.
///
/// Fails before any table is touched if two groups list the same chunk
/// indices (in any order), or if a group references a chunk the corpus does not have. Groups
/// may otherwise overlap.
pub fn group_division(corpus: &Corpus, specs: &[GroupSpec]) -> TopwordResult<Vec<Group>> {
    validate_groups(specs, corpus.len())?;

    let groups: Vec<Group> = specs
        .iter()
        .map(|spec| Group {
            name: spec.name.clone(),
            indices: spec.chunks.clone(),
            chunks: spec
                .chunks
                .iter()
                .map(|&index| corpus.chunks[index].clone())
                .collect(),
        })
        .collect();

    debug!("Divided {} chunks into {} groups.", corpus.len(), groups.len());
    Ok(groups)
}

/// Validates group definitions against a corpus of `num_chunks` chunks.
pub fn validate_groups(specs: &[GroupSpec], num_chunks: usize) -> TopwordResult<()> {
    let lists: Vec<Vec<usize>> = specs.iter().map(GroupSpec::sorted_indices).collect();
    for i in 0..lists.len() {
        for j in (i + 1)..lists.len() {
            if lists[i] == lists[j] {
                warn!(
                    "Group '{}' and group '{}' reference the same chunks.",
                    specs[i].name, specs[j].name
                );
                return Err(TopwordError::DuplicateGroup { first: i, second: j });
            }
        }
    }

    for (group, spec) in specs.iter().enumerate() {
        if spec.chunks.is_empty() {
            warn!("Group '{}' has no chunks.", spec.name);
        }
        if let Some(&index) = spec.chunks.iter().find(|&&index| index >= num_chunks) {
            return Err(TopwordError::ChunkOutOfRange {
                group,
                index,
                chunks: num_chunks,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_texts(["a a b", "b c", "c c c d"])
    }

    #[test]
    fn test_corpus_merged() {
        let merged = corpus().merged();
        assert_eq!(merged.count("c"), 4);
        assert_eq!(merged.total(), 9);
    }

    #[test]
    fn test_group_division_resolves_tables() {
        let specs = vec![GroupSpec::new("early", vec![0, 1]), GroupSpec::new("late", vec![2])];
        let groups = group_division(&corpus(), &specs).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].chunks.len(), 2);
        assert_eq!(groups[0].merged().count("b"), 2);
        assert_eq!(groups[1].indices, vec![2]);
    }

    #[test]
    fn test_identical_groups_are_rejected() {
        let specs = GroupSpec::from_index_lists(&[vec![0, 1], vec![0, 1]]);
        let err = group_division(&corpus(), &specs).unwrap_err();
        assert!(matches!(err, TopwordError::DuplicateGroup { first: 0, second: 1 }));
    }

    #[test]
    fn test_reordered_indices_are_the_same_group() {
        let specs = GroupSpec::from_index_lists(&[vec![2], vec![0, 1], vec![1, 0]]);
        let err = validate_groups(&specs, 3).unwrap_err();
        assert!(matches!(err, TopwordError::DuplicateGroup { first: 1, second: 2 }));
    }

    #[test]
    fn test_repeated_index_is_a_different_group() {
        let specs = GroupSpec::from_index_lists(&[vec![0, 0, 1], vec![0, 1]]);
        let groups = group_division(&corpus(), &specs).unwrap();
        assert_eq!(groups[0].merged().count("a"), 4);
        assert_eq!(groups[1].merged().count("a"), 2);

        let specs = GroupSpec::from_index_lists(&[vec![0, 1, 0], vec![0, 0, 1]]);
        assert!(matches!(
            validate_groups(&specs, 3),
            Err(TopwordError::DuplicateGroup { first: 0, second: 1 })
        ));
    }

    #[test]
    fn test_overlapping_groups_are_allowed() {
        let specs = GroupSpec::from_index_lists(&[vec![0, 1], vec![1, 2]]);
        assert!(group_division(&corpus(), &specs).is_ok());
    }

    #[test]
    fn test_out_of_range_chunk_is_rejected() {
        let specs = GroupSpec::from_index_lists(&[vec![0], vec![7]]);
        let err = group_division(&corpus(), &specs).unwrap_err();
        assert!(matches!(
            err,
            TopwordError::ChunkOutOfRange { group: 1, index: 7, chunks: 3 }
        ));
    }
}
