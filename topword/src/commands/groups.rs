//! `topword groups`: every chunk of every group against the other groups.

use anyhow::{bail, Result};
use log::info;

use topword_core::{headless_analyze, HeadlessMode, ReportResults};

use crate::cli::GroupsCommand;
use crate::commands::{emit_json, read_corpus, resolve_config, summary_line, Console};
use crate::ui::results_table::{render_group_ranking, RenderOptions};

pub fn run_groups(cmd: &GroupsCommand, console: &Console) -> Result<()> {
    let args = &cmd.analysis;
    let mut config = resolve_config(args)?;
    if !cmd.groups.is_empty() {
        config.groups = cmd.groups.clone();
        config.validate()?;
    }
    if config.groups.len() < 2 {
        bail!("Define at least two groups with --group NAME=I,J,.. or in the config file.");
    }

    let (corpus, labels) = read_corpus(&args.files)?;

    info!("Starting group analysis of {} groups.", config.groups.len());
    let report = headless_analyze(&config, &corpus, HeadlessMode::Groups)?;

    if emit_json(&report, args, console)? {
        return Ok(());
    }

    if let ReportResults::Groups { names, ranked } = &report.results {
        // Each group's chunks, labelled by file name.
        let members: Vec<Vec<String>> = config
            .groups
            .iter()
            .map(|g| {
                g.chunks
                    .iter()
                    .map(|&i| labels.get(i).cloned().unwrap_or_else(|| i.to_string()))
                    .collect()
            })
            .collect();
        let opts = RenderOptions {
            theme: &console.theme,
            enable_colors: console.stdout_colors(),
            significance: report.significance,
            top: args.top,
        };
        if ranked.is_empty() {
            console.warn("No word could be tested; try a wider band.");
        } else {
            println!("{}", render_group_ranking(ranked, names, &members, &opts));
        }
    }
    console.info(summary_line(&report));
    Ok(())
}
