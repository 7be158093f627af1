// topword/src/commands/mod.rs
//! Subcommand implementations and the plumbing they share: reading chunk
//! files, layering the analysis settings, and writing reports.

pub mod analyze;
pub mod describe;
pub mod groups;
pub mod profiles;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use topword_core::{
    apply_profile_to_config, load_profile_by_name, merge_config, AnalysisConfig, AnalysisReport, Corpus,
    UserAnalysisConfig,
};

use crate::cli::AnalysisArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Console settings shared by every command.
pub struct Console {
    pub theme: ThemeMap,
    pub quiet: bool,
}

impl Console {
    pub fn new(theme: ThemeMap, quiet: bool) -> Self {
        Self { theme, quiet }
    }

    pub fn stdout_colors(&self) -> bool {
        io::stdout().is_terminal()
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let colors = io::stderr().is_terminal();
        let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), &self.theme, colors);
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        let colors = io::stderr().is_terminal();
        let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), &self.theme, colors);
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        let colors = io::stderr().is_terminal();
        let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), &self.theme, colors);
    }
}

/// Reads each file as one chunk. Returns the corpus and a display label per
/// chunk (the file name).
pub fn read_corpus(files: &[PathBuf]) -> Result<(Corpus, Vec<String>)> {
    let texts = files
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let labels = files.iter().map(|p| file_label(p)).collect();

    let corpus = Corpus::from_texts(&texts);
    debug!("Read {} chunks.", corpus.len());
    Ok((corpus, labels))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Layers the settings: embedded defaults, then `--config`, then `--profile`,
/// then the individual flags. Only the fully layered result is validated.
pub fn resolve_config(args: &AnalysisArgs) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::load_default()?;

    if let Some(path) = &args.config {
        let user = UserAnalysisConfig::load_from_file(path)?;
        config = merge_config(config, Some(user));
        info!("Applied config file {}.", path.display());
    }

    if let Some(name) = &args.profile {
        let profile =
            load_profile_by_name(name).with_context(|| format!("Failed to load profile '{}'", name))?;
        config = apply_profile_to_config(&profile, config);
        info!("Applied profile '{}'.", profile.profile_name);
    }

    let flags = UserAnalysisConfig {
        policy: args.policy,
        low: args.low,
        high: args.high,
        ..Default::default()
    };
    let config = merge_config(config, Some(flags));
    config.validate()?;
    debug!("Resolved analysis config: {:?}", config);
    Ok(config)
}

/// Writes the report as JSON if asked to. Returns `true` when stdout was
/// used, so the caller skips the table.
pub fn emit_json(report: &AnalysisReport, args: &AnalysisArgs, console: &Console) -> Result<bool> {
    if args.json_stdout {
        println!("{}", report.to_json_pretty()?);
        return Ok(true);
    }
    if let Some(path) = &args.json_file {
        fs::write(path, report.to_json_pretty()?)
            .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
        console.info(format!("Report written to {}", path.display()));
    }
    Ok(false)
}

/// Closing line printed under a ranking table.
pub fn summary_line(report: &AnalysisReport) -> String {
    format!(
        "{} ranked words, {} below p = {} (policy {}, band {:.6}..{:.6}).",
        report.results.len(),
        report.significant_count(),
        report.significance,
        report.policy,
        report.band.low,
        report.band.high
    )
}
