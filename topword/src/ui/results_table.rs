//! Table rendering for ranked results and chunk statistics.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};

use topword_core::{ChunkSizeReport, RankedEntry, RankedGroupEntry, SizeAnomaly, TableSummary};

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Display options shared by the renderers.
pub struct RenderOptions<'a> {
    pub theme: &'a ThemeMap,
    pub enable_colors: bool,
    pub significance: f64,
    pub top: Option<usize>,
}

impl RenderOptions<'_> {
    fn header(&self, labels: &[&str]) -> Vec<Cell> {
        labels
            .iter()
            .map(|l| Cell::new(paint(l, ThemeEntry::Header, self.theme, self.enable_colors)))
            .collect()
    }

    fn word_cell(&self, word: &str) -> Cell {
        Cell::new(paint(word, ThemeEntry::Word, self.theme, self.enable_colors))
    }

    fn p_value_cell(&self, p_value: f64) -> Cell {
        let entry = if p_value < self.significance {
            ThemeEntry::Significant
        } else {
            ThemeEntry::NotSignificant
        };
        Cell::new(paint(&format_p_value(p_value), entry, self.theme, self.enable_colors))
            .set_alignment(CellAlignment::Right)
    }

    fn limit(&self, len: usize) -> usize {
        self.top.map_or(len, |n| n.min(len))
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).apply_modifier(UTF8_ROUND_CORNERS);
    table
}

/// Fixed notation down to 1e-4, scientific below.
pub fn format_p_value(p: f64) -> String {
    if p != 0.0 && p < 1e-4 {
        format!("{:.3e}", p)
    } else {
        format!("{:.6}", p)
    }
}

/// Corpus-wide ranking. `labels[i]` names chunk `i + 1`.
pub fn render_corpus_ranking(ranked: &[RankedEntry], labels: &[String], opts: &RenderOptions) -> Table {
    let mut table = new_table();
    table.set_header(opts.header(&["#", "Chunk", "Word", "p-value"]));

    for (rank, entry) in ranked.iter().take(opts.limit(ranked.len())).enumerate() {
        let label = chunk_label(labels, entry.chunk.wrapping_sub(1));
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(label),
            opts.word_cell(&entry.word),
            opts.p_value_cell(entry.p_value),
        ]);
    }
    table
}

/// Group ranking. `members[g][c]` names chunk `c` of group `g`.
pub fn render_group_ranking(
    ranked: &[RankedGroupEntry],
    names: &[String],
    members: &[Vec<String>],
    opts: &RenderOptions,
) -> Table {
    let mut table = new_table();
    table.set_header(opts.header(&["#", "Group", "Chunk", "Compared with", "Word", "p-value"]));

    for (rank, entry) in ranked.iter().take(opts.limit(ranked.len())).enumerate() {
        let chunk = members
            .get(entry.source)
            .map(|chunks| chunk_label(chunks, entry.chunk))
            .unwrap_or_else(|| entry.chunk.to_string());
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(chunk_label(names, entry.source)),
            Cell::new(chunk),
            Cell::new(chunk_label(names, entry.target)),
            opts.word_cell(&entry.word),
            opts.p_value_cell(entry.p_value),
        ]);
    }
    table
}

/// One row of count statistics per chunk.
pub fn render_chunk_summaries(summaries: &[(String, Option<TableSummary>)], opts: &RenderOptions) -> Table {
    let mut table = new_table();
    table.set_header(opts.header(&[
        "Chunk", "Distinct", "Total", "Mean", "Std dev", "Q1", "Median", "Q3", "IQR",
    ]));

    for (label, summary) in summaries {
        let mut row = vec![Cell::new(label)];
        match summary {
            Some(s) => {
                row.push(Cell::new(s.num_words).set_alignment(CellAlignment::Right));
                row.push(Cell::new(s.total_word_count).set_alignment(CellAlignment::Right));
                for value in [s.average, s.std_dev, s.q1, s.median, s.q3, s.iqr] {
                    row.push(Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right));
                }
            }
            None => row.push(Cell::new("(empty)")),
        }
        table.add_row(row);
    }
    table
}

/// Chunk sizes with the anomaly flags of both rules.
pub fn render_size_report(report: &ChunkSizeReport, labels: &[String], opts: &RenderOptions) -> Table {
    let mut table = new_table();
    table.set_header(opts.header(&["Chunk", "Words", "Mean ± 2σ", "Median ± 1.5 IQR"]));

    let flag = |anomalies: &[(usize, SizeAnomaly)], index: usize| -> String {
        match anomalies.iter().find(|(i, _)| *i == index).map(|(_, a)| a) {
            Some(SizeAnomaly::Large) => paint("large", ThemeEntry::Anomaly, opts.theme, opts.enable_colors),
            Some(SizeAnomaly::Small) => paint("small", ThemeEntry::Anomaly, opts.theme, opts.enable_colors),
            None => String::new(),
        }
    };

    for (index, size) in report.sizes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(chunk_label(labels, index)),
            Cell::new(size).set_alignment(CellAlignment::Right),
            Cell::new(flag(&report.anomalies_std_dev, index)),
            Cell::new(flag(&report.anomalies_iqr, index)),
        ]);
    }
    table
}

fn chunk_label(labels: &[String], index: usize) -> String {
    labels.get(index).cloned().unwrap_or_else(|| index.to_string())
}
