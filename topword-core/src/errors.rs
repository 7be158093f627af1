//! errors.rs - Custom error types for the topword-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! A z-test that cannot be computed is *not* an error; it is reported as
//! [`topword_stats::ZTestOutcome::Insignificant`].
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `topword-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TopwordError {
    #[error("Unknown band policy '{0}'. Expected one of: CustomP, CustomF, TopStdE, MidStdE, LowStdE, TopIQR, MidIQR, LowIQR")]
    UnknownPolicy(String),

    #[error("Group {first} and group {second} reference the same chunks")]
    DuplicateGroup { first: usize, second: usize },

    #[error("Group {group} references chunk {index}, but the corpus only has {chunks} chunks")]
    ChunkOutOfRange {
        group: usize,
        index: usize,
        chunks: usize,
    },

    #[error("Cannot compute a band over an empty word-frequency table")]
    EmptyCorpus,
}

/// Convenience alias for results produced by the statistical core.
pub type TopwordResult<T> = std::result::Result<T, TopwordError>;
