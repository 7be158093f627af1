//! `topword analyze`: every chunk against the whole corpus.

use anyhow::Result;
use log::info;

use topword_core::{headless_analyze, HeadlessMode, ReportResults};

use crate::cli::AnalyzeCommand;
use crate::commands::{emit_json, read_corpus, resolve_config, summary_line, Console};
use crate::ui::results_table::{render_corpus_ranking, RenderOptions};

pub fn run_analyze(cmd: &AnalyzeCommand, console: &Console) -> Result<()> {
    let args = &cmd.analysis;
    let config = resolve_config(args)?;
    let (corpus, labels) = read_corpus(&args.files)?;

    info!("Starting corpus-wide analysis of {} chunks.", corpus.len());
    let report = headless_analyze(&config, &corpus, HeadlessMode::CorpusWide)?;

    if emit_json(&report, args, console)? {
        return Ok(());
    }

    if let ReportResults::CorpusWide { ranked } = &report.results {
        let opts = RenderOptions {
            theme: &console.theme,
            enable_colors: console.stdout_colors(),
            significance: report.significance,
            top: args.top,
        };
        if ranked.is_empty() {
            console.warn("No word could be tested; try a wider band.");
        } else {
            println!("{}", render_corpus_ranking(ranked, &labels, &opts));
        }
    }
    console.info(summary_line(&report));
    Ok(())
}
