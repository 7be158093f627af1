// File: topword-core/src/profiles.rs

//! profiles.rs - Named analysis profiles for topword.
//!
//! A profile is a small YAML file that stores a reusable set of analysis
//! settings (band policy, bounds, groups) under a name, e.g. a "rare-words"
//! profile using `LowStdE`, or a per-project set of candidate author groups.
//! Profiles are looked up by name in a fixed list of directories, or loaded
//! directly from a path, and are overlaid onto the default configuration.
//!
//! license: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{merge_config, AnalysisConfig, UserAnalysisConfig};

/// A named, reusable set of analysis settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Falls back to the file stem when missing.
    #[serde(default)]
    pub profile_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub settings: UserAnalysisConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile_name: String,
    pub description: Option<String>,
    pub path: Option<PathBuf>,
}

fn profile_dirs() -> Vec<PathBuf> {
    vec![
        dirs::home_dir().map(|p| p.join(".topword").join("profiles")),
        dirs::config_dir().map(|p| p.join("topword").join("profiles")),
        Some(PathBuf::from("./config")),
        Some(PathBuf::from("../config")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Every location a profile called `name` may live in, in lookup order.
pub fn profile_candidate_paths(name: &str) -> Vec<PathBuf> {
    profile_dirs()
        .into_iter()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a profile given either a path to a YAML file or a profile name.
pub fn load_profile_by_name(name_or_path: &str) -> Result<ProfileConfig> {
    debug!("Attempting to load profile from: '{}'", name_or_path);

    let path_to_load = {
        let path = Path::new(name_or_path);
        if path.is_file() {
            debug!("Input is a valid file path. Loading directly from: {}", path.display());
            Some(path.to_path_buf())
        } else {
            profile_candidate_paths(name_or_path)
                .into_iter()
                .find(|p| p.exists())
        }
    }
    .context("Profile not found. It is not a valid file path, and was not found in expected locations.")?;

    let text = fs::read_to_string(&path_to_load)
        .with_context(|| format!("reading profile file {}", path_to_load.display()))?;
    let cfg = parse_profile(&text, &path_to_load)?.with_context(|| {
        format!(
            "{} is not a profile: it has neither `profile_name` nor `settings`",
            path_to_load.display()
        )
    })?;

    debug!("Successfully loaded profile '{}'.", cfg.profile_name);
    Ok(cfg)
}

/// Parses one profile file. Returns `Ok(None)` for YAML that is not a
/// profile at all (no `profile_name` and no `settings` key), such as an
/// analysis config sitting in the same directory.
fn parse_profile(text: &str, path: &Path) -> Result<Option<ProfileConfig>> {
    let value: serde_yml::Value =
        serde_yml::from_str(text).with_context(|| format!("parsing profile YAML {}", path.display()))?;
    if value.get("profile_name").is_none() && value.get("settings").is_none() {
        return Ok(None);
    }

    let mut cfg: ProfileConfig =
        serde_yml::from_value(value).with_context(|| format!("parsing profile YAML {}", path.display()))?;
    if cfg.profile_name.is_empty() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        warn!(
            "Profile at '{}' has an empty `profile_name`; using '{}'.",
            path.display(),
            stem
        );
        cfg.profile_name = stem;
    }
    Ok(Some(cfg))
}

/// Overlays a profile's settings onto `base`.
///
/// The result is not validated: later layers (command-line flags) may still
/// change it, so callers validate once every layer is applied.
pub fn apply_profile_to_config(profile: &ProfileConfig, base: AnalysisConfig) -> AnalysisConfig {
    debug!("Applying profile '{}'.", profile.profile_name);
    merge_config(base, Some(profile.settings.clone()))
}

/// Lists profiles found in the candidate directories.
/// Unreadable or unparsable files are skipped with a warning; YAML files that
/// are not profiles are skipped quietly.
pub fn list_available_profiles() -> Vec<ProfileSummary> {
    list_profiles_in(&profile_dirs())
}

fn list_profiles_in(dirs: &[PathBuf]) -> Vec<ProfileSummary> {
    let mut out = Vec::new();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            debug!("Candidate profile directory not found: {}", dir.display());
            continue;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("yaml") || !seen_paths.insert(path.clone()) {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(s) => match parse_profile(&s, &path) {
                    Ok(Some(cfg)) => out.push(ProfileSummary {
                        profile_name: cfg.profile_name,
                        description: cfg.description,
                        path: Some(path),
                    }),
                    Ok(None) => debug!("Skipping non-profile YAML: {}", path.display()),
                    Err(e) => warn!("Failed to parse YAML for profile at '{}': {:#}", path.display(), e),
                },
                Err(e) => warn!("Failed to read profile file at '{}': {}", path.display(), e),
            }
        }
    }

    out
}
