// topword/src/main.rs
//! topword entry point.
//!
//! Parses the command line, installs the logger and theme, and dispatches to
//! the subcommand. Any error is printed to stderr and exits with status 1.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use topword::cli::{Cli, Commands};
use topword::commands::{analyze, describe, groups, profiles, Console};
use topword::logger;
use topword::ui::theme::{build_theme_map, default_theme_map};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let console = match build_theme_map(cli.theme.as_deref()).context("Theme error") {
        Ok(theme) => Console::new(theme, cli.quiet),
        Err(e) => {
            Console::new(default_theme_map(), cli.quiet).error(format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, console: &Console) -> Result<()> {
    match &cli.command {
        Commands::Analyze(cmd) => analyze::run_analyze(cmd, console),
        Commands::Groups(cmd) => groups::run_groups(cmd, console),
        Commands::Describe(cmd) => describe::run_describe(cmd, console),
        Commands::Profiles(cmd) => profiles::run_profiles(cmd, console),
    }
}
