// topword-core/src/lib.rs
//! # topword Core Library
//!
//! `topword-core` finds the words whose usage in one chunk of a corpus (or in
//! one group of chunks) differs significantly from the rest. It builds
//! word-frequency tables, selects which words are eligible for testing through
//! an outlier band, runs a two-proportion z-test per word, and ranks the
//! results.
//!
//! The library is pure and stateless: no I/O besides config/profile loading,
//! no global state, no threads.
//!
//! ## Modules
//!
//! * `table`: [`WordFrequencyTable`], tokenizer and merging.
//! * `corpus`: [`Corpus`], [`GroupSpec`] and [`group_division`].
//! * `policy`: the named band policies ([`BandPolicy`]).
//! * `band`: [`compute_band`] and [`OutlierBand`].
//! * `comparer`: [`test_all`] (chunk vs corpus) and [`test_group`] (chunk vs group),
//!   each with an `_in_band` form taking a precomputed band.
//! * `ranking`: [`flatten_and_sort`] and [`flatten_group_results`].
//! * `summary`: descriptive statistics of tables and chunk sizes.
//! * `config` / `profiles`: YAML analysis settings and named profiles.
//! * `headless`: one-call analysis returning an [`AnalysisReport`].
//!
//! ## Usage Example
//!
//! ```rust
//! use topword_core::{flatten_and_sort, test_all, BandPolicy, Corpus};
//!
//! fn main() -> Result<(), topword_core::TopwordError> {
//!     let corpus = Corpus::from_texts([
//!         "call me ishmael some years ago never mind how long",
//!         "it was the best of times it was the worst of times",
//!     ]);
//!
//!     let per_chunk = test_all(&corpus, "CustomP".parse::<BandPolicy>()?, 0.0, 1.0)?;
//!     for entry in flatten_and_sort(&per_chunk).iter().take(5) {
//!         println!("chunk {} {:>12} {:.4}", entry.chunk, entry.word, entry.p_value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The statistical core returns [`TopwordError`] for configuration problems
//! (unknown policy, duplicate groups). A z-test that is numerically undefined
//! is not an error: it yields [`ZTestOutcome::Insignificant`]. Config and
//! profile loading use `anyhow::Error`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod band;
pub mod comparer;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod headless;
pub mod policy;
pub mod profiles;
pub mod ranking;
pub mod report;
pub mod summary;
pub mod table;

/// Re-exports the custom error type for clear error reporting.
pub use errors::{TopwordError, TopwordResult};

/// Re-exports the data model.
pub use corpus::{group_division, Corpus, Group, GroupSpec};
pub use table::{merge_tables, WordFrequencyTable};

/// Re-exports the band policies and band computation.
pub use band::{compute_band, OutlierBand};
pub use policy::{BandPolicy, BandTier};

/// Re-exports the comparers and their result types.
pub use comparer::{
    corpus_band, group_band, test_all, test_all_in_band, test_group, test_group_in_band, GroupKey, GroupResults,
    RankedResultList, WordResult,
};
pub use ranking::{flatten_and_sort, flatten_group_results, RankedEntry, RankedGroupEntry};

/// Re-exports the z-test primitive from `topword-stats`.
pub use topword_stats::{z_test, ZTestOutcome};

/// Re-exports descriptive summaries.
pub use summary::{ChunkSizeReport, SizeAnomaly, TableSummary};

/// Re-exports configuration and profile handling.
pub use config::{merge_config, AnalysisConfig, UserAnalysisConfig};
pub use profiles::{
    apply_profile_to_config, list_available_profiles, load_profile_by_name, profile_candidate_paths,
    ProfileConfig, ProfileSummary,
};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{headless_analyze, HeadlessMode};
pub use report::{corpus_fingerprint, AnalysisReport, ReportResults};
