// topword/src/logger.rs
//! Logging setup for the binary. Library crates only use the `log` facade.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs `env_logger` writing to stderr.
///
/// `RUST_LOG` is honoured unless `level_override` is given, in which case it
/// wins. Calling this twice is harmless; the second call is ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}

/// Maps the `--quiet` / `--debug` flags to a level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Error)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Error));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
