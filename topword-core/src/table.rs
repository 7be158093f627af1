// topword-core/src/table.rs
//! Word-frequency tables: the unit of data every comparison works on.
//!
//! A [`WordFrequencyTable`] maps a word to its number of occurrences inside one
//! chunk (or inside a merged scope such as a group or the whole corpus). Words
//! are case-sensitive and assumed to be already scrubbed by the tokenizer.
//! A missing word has a count of zero.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Occurrence counts for one chunk or one merged scope.
///
/// Words iterate in lexicographic order, which keeps every report
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct WordFrequencyTable {
    counts: BTreeMap<String, u64>,
    total: u64,
}

impl WordFrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the whitespace-separated tokens of an already scrubbed text.
    pub fn from_text(text: &str) -> Self {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for word in text.split_whitespace() {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
        Self::from(counts)
    }

    /// Converts a word-count matrix into one table per row.
    ///
    /// `words` is the header (one word per column) and every row holds the
    /// counts of those words for a single chunk. Columns missing from a short
    /// row are ignored.
    pub fn from_matrix_rows<S: AsRef<str>>(words: &[S], rows: &[Vec<u64>]) -> Vec<Self> {
        rows.iter()
            .map(|row| {
                words
                    .iter()
                    .zip(row.iter())
                    .map(|(word, count)| (word.as_ref().to_string(), *count))
                    .collect()
            })
            .collect()
    }

    /// Occurrences of `word`, zero if absent.
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words (the vocabulary size).
    pub fn num_words(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Share of `word` among all occurrences in this table, zero for an
    /// empty table.
    pub fn proportion(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64
    }

    /// Iterates over `(word, count)` pairs in word order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.counts.iter()
    }

    /// Iterates over the counts in word order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// Adds every count of `other` into this table.
    pub fn absorb(&mut self, other: &WordFrequencyTable) {
        for (word, count) in other.iter() {
            *self.counts.entry(word.clone()).or_insert(0) += *count;
        }
        self.total += other.total;
    }

    /// Element-wise sum of two tables over the union of their words.
    pub fn merge(&self, other: &WordFrequencyTable) -> WordFrequencyTable {
        let mut merged = self.clone();
        merged.absorb(other);
        merged
    }
}

/// Element-wise sum of any number of tables.
pub fn merge_tables<'a, I>(tables: I) -> WordFrequencyTable
where
    I: IntoIterator<Item = &'a WordFrequencyTable>,
{
    let mut merged = WordFrequencyTable::new();
    for table in tables {
        merged.absorb(table);
    }
    merged
}

impl From<BTreeMap<String, u64>> for WordFrequencyTable {
    fn from(counts: BTreeMap<String, u64>) -> Self {
        let total = counts.values().sum();
        Self { counts, total }
    }
}

impl From<WordFrequencyTable> for BTreeMap<String, u64> {
    fn from(table: WordFrequencyTable) -> Self {
        table.counts
    }
}

impl FromIterator<(String, u64)> for WordFrequencyTable {
    /// Repeated words accumulate.
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for (word, count) in iter {
            *counts.entry(word).or_insert(0) += count;
        }
        Self::from(counts)
    }
}

impl<'a> FromIterator<(&'a str, u64)> for WordFrequencyTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, u64)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect()
    }
}

impl<'a> IntoIterator for &'a WordFrequencyTable {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
