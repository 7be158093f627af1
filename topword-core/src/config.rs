//! Configuration management for `topword-core`.
//!
//! This module defines the analysis configuration: which band policy to use,
//! the caller's bounds, the significance level used when presenting results,
//! and optional group definitions. It handles YAML (de)serialization and
//! provides utilities for loading, merging, and validating configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::corpus::GroupSpec;
use crate::policy::BandPolicy;

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Band policy, by name.
    pub policy: BandPolicy,
    /// Lower band bound. Proportion for `CustomP`, raw count for `CustomF`.
    pub low: f64,
    /// Upper band bound. Proportion for `CustomP`, raw count for `CustomF`.
    pub high: f64,
    /// P-values below this are highlighted in reports. Does not filter.
    pub significance: f64,
    /// Named groups for group-vs-group analysis.
    pub groups: Vec<GroupSpec>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            policy: BandPolicy::CustomP,
            low: 0.0,
            high: 1.0,
            significance: 0.05,
            groups: Vec::new(),
        }
    }
}

/// Partial configuration as read from a user file. Every field is optional so
/// that a user file only overrides what it mentions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserAnalysisConfig {
    pub policy: Option<BandPolicy>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub significance: Option<f64>,
    pub groups: Option<Vec<GroupSpec>>,
}

impl AnalysisConfig {
    /// Loads the built-in defaults from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default analysis config from embedded string...");
        let default_yaml = include_str!("../config/default_analysis.yaml");
        let config: AnalysisConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default analysis config")?;
        Ok(config)
    }

    /// Loads a complete configuration from a YAML file, filling omitted
    /// fields with defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let user = UserAnalysisConfig::load_from_file(path)?;
        let config = merge_config(AnalysisConfig::default(), Some(user));
        config.validate()?;
        Ok(config)
    }

    /// Checks bounds, significance and group names.
    ///
    /// Group index lists are checked against the corpus later, when the corpus
    /// is known.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !self.low.is_finite() || !self.high.is_finite() {
            errors.push(format!("Band bounds must be finite (low={}, high={}).", self.low, self.high));
        } else if self.policy.is_custom() && self.low >= self.high {
            errors.push(format!(
                "Band is empty: low ({}) must be below high ({}).",
                self.low, self.high
            ));
        }

        if self.policy == BandPolicy::CustomP && (self.low < 0.0 || self.high > 1.0) {
            debug!(
                "CustomP bounds ({}, {}) reach outside [0, 1]; they are still used as given.",
                self.low, self.high
            );
        }

        if !(self.significance > 0.0 && self.significance <= 1.0) {
            errors.push(format!(
                "Significance level must be in (0, 1], got {}.",
                self.significance
            ));
        }

        let mut names = HashSet::new();
        for group in &self.groups {
            if group.name.is_empty() {
                errors.push("A group has an empty `name` field.".to_string());
            } else if !names.insert(group.name.as_str()) {
                errors.push(format!("Duplicate group name found: '{}'.", group.name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Analysis config validation failed:\n{}", errors.join("\n")))
        }
    }
}

impl UserAnalysisConfig {
    /// Reads a partial configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading analysis config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: UserAnalysisConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

/// Overlays user-provided settings on top of a base configuration.
pub fn merge_config(base: AnalysisConfig, user: Option<UserAnalysisConfig>) -> AnalysisConfig {
    let mut merged = base;

    if let Some(user) = user {
        if let Some(policy) = user.policy {
            debug!("Overriding policy with user value: {}", policy);
            merged.policy = policy;
        }
        if let Some(low) = user.low {
            debug!("Overriding low bound with user value: {}", low);
            merged.low = low;
        }
        if let Some(high) = user.high {
            debug!("Overriding high bound with user value: {}", high);
            merged.high = high;
        }
        if let Some(significance) = user.significance {
            debug!("Overriding significance with user value: {}", significance);
            merged.significance = significance;
        }
        if let Some(groups) = user.groups {
            debug!("User config defines {} groups.", groups.len());
            merged.groups = groups;
        }
    }

    merged
}
