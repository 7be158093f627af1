// topword/src/lib.rs
//! # topword CLI Application
//!
//! Terminal front end for `topword-core`: reads one text file per chunk,
//! resolves the analysis settings (embedded defaults, config file, profile,
//! command-line flags), runs the comparison and prints a ranked table or a
//! JSON report.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
