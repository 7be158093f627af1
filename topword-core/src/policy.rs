// topword-core/src/policy.rs
//! Named policies that decide which words are eligible for testing.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TopwordError;

/// Which side of the distribution a statistics-based policy keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandTier {
    /// Only the right-hand outliers (unusually frequent words).
    Top,
    /// Only the non-outliers.
    Mid,
    /// Only the left-hand outliers (unusually rare words).
    Low,
}

/// Policy used to derive the `(low, high)` proportion band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BandPolicy {
    /// Caller-supplied bounds, already proportions.
    CustomP,
    /// Caller-supplied bounds as raw counts, divided by the vocabulary size.
    CustomF,
    /// Mean ± 2 × spread of per-word counts.
    StdE(BandTier),
    /// Median ± 1.5 × IQR of per-word counts.
    Iqr(BandTier),
}

impl BandPolicy {
    /// Every accepted policy, in the order they are documented.
    pub const ALL: [BandPolicy; 8] = [
        BandPolicy::CustomP,
        BandPolicy::CustomF,
        BandPolicy::StdE(BandTier::Top),
        BandPolicy::StdE(BandTier::Mid),
        BandPolicy::StdE(BandTier::Low),
        BandPolicy::Iqr(BandTier::Top),
        BandPolicy::Iqr(BandTier::Mid),
        BandPolicy::Iqr(BandTier::Low),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BandPolicy::CustomP => "CustomP",
            BandPolicy::CustomF => "CustomF",
            BandPolicy::StdE(BandTier::Top) => "TopStdE",
            BandPolicy::StdE(BandTier::Mid) => "MidStdE",
            BandPolicy::StdE(BandTier::Low) => "LowStdE",
            BandPolicy::Iqr(BandTier::Top) => "TopIQR",
            BandPolicy::Iqr(BandTier::Mid) => "MidIQR",
            BandPolicy::Iqr(BandTier::Low) => "LowIQR",
        }
    }

    /// Whether the caller's `low`/`high` arguments feed into the band.
    pub fn is_custom(&self) -> bool {
        matches!(self, BandPolicy::CustomP | BandPolicy::CustomF)
    }
}

impl Default for BandPolicy {
    fn default() -> Self {
        BandPolicy::CustomP
    }
}

impl fmt::Display for BandPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandPolicy {
    type Err = TopwordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BandPolicy::ALL
            .iter()
            .copied()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| TopwordError::UnknownPolicy(s.to_string()))
    }
}

impl TryFrom<String> for BandPolicy {
    type Error = TopwordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BandPolicy> for String {
    fn from(policy: BandPolicy) -> Self {
        policy.name().to_string()
    }
}
