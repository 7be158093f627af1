// topword/src/cli.rs
//! Command-line interface definition for the `topword` binary.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use topword_core::{BandPolicy, GroupSpec};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "topword",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rank the words whose usage stands out in a chunk or group of texts",
    long_about = "topword compares word frequencies between chunks of a corpus (one text file per chunk) using a two-proportion z-test, and ranks the words by how unlikely their usage is under the rest of the corpus. An outlier band restricts which words are tested.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true, help = "Enable debug logging (overrides RUST_LOG).")]
    pub debug: bool,

    /// Custom YAML theme for console output.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tests every chunk against the whole corpus.
    #[command(about = "Test every chunk against the whole corpus and rank the results.")]
    Analyze(AnalyzeCommand),

    /// Tests every chunk of every group against every other group.
    #[command(about = "Test every chunk of every group against the other groups and rank the results.")]
    Groups(GroupsCommand),

    /// Prints descriptive statistics for each chunk.
    #[command(about = "Print word-count statistics per chunk and flag unusually sized chunks.")]
    Describe(DescribeCommand),

    /// Manages analysis profiles.
    #[command(subcommand, about = "Inspect the locally available analysis profiles.")]
    Profiles(ProfilesCommand),
}

/// Settings shared by `analyze` and `groups`.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// One text file per chunk, in chunk order.
    #[arg(value_name = "FILES", required = true, num_args = 1.., help = "Input text files, one chunk each.")]
    pub files: Vec<PathBuf>,

    #[arg(long, value_name = "POLICY", value_parser = parse_policy, help = "Outlier band policy: CustomP, CustomF, TopStdE, MidStdE, LowStdE, TopIQR, MidIQR or LowIQR.")]
    pub policy: Option<BandPolicy>,

    #[arg(long, value_name = "LOW", allow_negative_numbers = true, help = "Lower band bound (used by custom policies and kept by LowStdE/LowIQR).")]
    pub low: Option<f64>,

    #[arg(long, value_name = "HIGH", allow_negative_numbers = true, help = "Upper band bound (used by custom policies and kept by TopStdE/TopIQR).")]
    pub high: Option<f64>,

    #[arg(long = "config", value_name = "FILE", help = "Path to a custom analysis configuration file (YAML).")]
    pub config: Option<PathBuf>,

    #[arg(long = "profile", value_name = "NAME", help = "Loads a named analysis profile.")]
    pub profile: Option<String>,

    #[arg(long = "top", value_name = "N", help = "Print only the N lowest p-values.")]
    pub top: Option<usize>,

    #[arg(long = "json-file", value_name = "FILE", help = "Write the full report as JSON to a file.")]
    pub json_file: Option<PathBuf>,

    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the full report as JSON to stdout.")]
    pub json_stdout: bool,
}

#[derive(Parser, Debug)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

#[derive(Parser, Debug)]
pub struct GroupsCommand {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Group definitions; replace any groups from the config or profile.
    #[arg(
        long = "group",
        value_name = "NAME=I,J,..",
        value_parser = parse_group_spec,
        help = "Define a group from 0-based file positions, e.g. --group hamilton=0,1,2. Repeat for each group."
    )]
    pub groups: Vec<GroupSpec>,
}

#[derive(Parser, Debug)]
pub struct DescribeCommand {
    #[arg(value_name = "FILES", required = true, num_args = 1.., help = "Input text files, one chunk each.")]
    pub files: Vec<PathBuf>,

    #[arg(long = "json-stdout", help = "Print the statistics as JSON to stdout.")]
    pub json_stdout: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    #[command(about = "Lists all available local profiles.")]
    List,
}

/// Errors raised while parsing a `--group` value.
#[derive(Debug, Error, PartialEq)]
pub enum GroupArgError {
    #[error("expected NAME=I,J,.. but got '{0}'")]
    MissingSeparator(String),
    #[error("group name is empty in '{0}'")]
    EmptyName(String),
    #[error("group '{0}' lists no chunks")]
    NoChunks(String),
    #[error("'{index}' in group '{group}' is not a chunk position")]
    BadIndex { group: String, index: String },
}

pub fn parse_group_spec(value: &str) -> Result<GroupSpec, GroupArgError> {
    let (name, list) = value
        .split_once('=')
        .ok_or_else(|| GroupArgError::MissingSeparator(value.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(GroupArgError::EmptyName(value.to_string()));
    }

    let chunks = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>().map_err(|_| GroupArgError::BadIndex {
                group: name.to_string(),
                index: s.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if chunks.is_empty() {
        return Err(GroupArgError::NoChunks(name.to_string()));
    }

    Ok(GroupSpec::new(name, chunks))
}

fn parse_policy(value: &str) -> Result<BandPolicy, String> {
    value.parse::<BandPolicy>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_group_specs() {
        assert_eq!(
            parse_group_spec("hamilton=0, 1,2").unwrap(),
            GroupSpec::new("hamilton", vec![0, 1, 2])
        );
        assert_eq!(
            parse_group_spec("madison").unwrap_err(),
            GroupArgError::MissingSeparator("madison".into())
        );
        assert_eq!(parse_group_spec("=1").unwrap_err(), GroupArgError::EmptyName("=1".into()));
        assert_eq!(parse_group_spec("jay=").unwrap_err(), GroupArgError::NoChunks("jay".into()));
        assert!(matches!(parse_group_spec("jay=1,x"), Err(GroupArgError::BadIndex { .. })));
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "topword", "analyze", "a.txt", "b.txt", "--policy", "MidIQR", "--top", "5",
        ])
        .unwrap();
        let Commands::Analyze(cmd) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(cmd.analysis.files.len(), 2);
        assert_eq!(cmd.analysis.policy, Some(BandPolicy::Iqr(topword_core::BandTier::Mid)));
        assert_eq!(cmd.analysis.top, Some(5));
    }

    #[test]
    fn parses_negative_band_bounds() {
        let cli = Cli::try_parse_from([
            "topword", "analyze", "a.txt", "--policy", "CustomF", "--low", "-2", "--high", "-0.5",
        ])
        .unwrap();
        let Commands::Analyze(cmd) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(cmd.analysis.low, Some(-2.0));
        assert_eq!(cmd.analysis.high, Some(-0.5));
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = Cli::try_parse_from(["topword", "analyze", "a.txt", "--policy", "TopMedian"]).unwrap_err();
        assert!(err.to_string().contains("TopMedian"));
    }
}
