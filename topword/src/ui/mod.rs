// topword/src/ui/mod.rs
//! Console rendering: colour theme, status messages and result tables.

pub mod output_format;
pub mod results_table;
pub mod theme;
