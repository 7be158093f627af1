//! `topword describe`: count statistics per chunk and chunk size anomalies.

use anyhow::Result;
use serde::Serialize;

use topword_core::{ChunkSizeReport, TableSummary};

use crate::cli::DescribeCommand;
use crate::commands::{read_corpus, Console};
use crate::ui::results_table::{render_chunk_summaries, render_size_report, RenderOptions};

#[derive(Serialize)]
struct DescribeReport<'a> {
    chunks: Vec<ChunkDescription<'a>>,
    sizes: Option<ChunkSizeReport>,
}

#[derive(Serialize)]
struct ChunkDescription<'a> {
    label: &'a str,
    counts: Option<TableSummary>,
    proportions: Option<TableSummary>,
}

pub fn run_describe(cmd: &DescribeCommand, console: &Console) -> Result<()> {
    let (corpus, labels) = read_corpus(&cmd.files)?;

    let summaries: Vec<(String, Option<TableSummary>)> = corpus
        .chunks()
        .iter()
        .zip(&labels)
        .map(|(chunk, label)| (label.clone(), TableSummary::from_table(chunk)))
        .collect();
    let sizes = ChunkSizeReport::from_corpus(&corpus);

    if cmd.json_stdout {
        let report = DescribeReport {
            chunks: summaries
                .iter()
                .map(|(label, summary)| ChunkDescription {
                    label,
                    counts: summary.clone(),
                    proportions: summary.as_ref().map(TableSummary::as_proportions),
                })
                .collect(),
            sizes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let opts = RenderOptions {
        theme: &console.theme,
        enable_colors: console.stdout_colors(),
        significance: 0.0,
        top: None,
    };
    println!("{}", render_chunk_summaries(&summaries, &opts));
    if let Some(sizes) = &sizes {
        println!("{}", render_size_report(sizes, &labels, &opts));
        let flagged = sizes.anomalies_std_dev.len() + sizes.anomalies_iqr.len();
        if flagged > 0 {
            console.warn(format!("{} chunk size flags raised; compare flagged chunks before testing.", flagged));
        }
    }
    Ok(())
}
