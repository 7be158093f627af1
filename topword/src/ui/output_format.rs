//! Themed status messages written to stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme colour for `entry` when `enable_colors` is set.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    let color = theme.get(&entry).and_then(|style| style.fg.as_ref());
    match color {
        Some(color) if enable_colors => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{}{}", prefix, message), entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", message, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Warning: ", message, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Error: ", message, ThemeEntry::Error, theme, enable_colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::default_theme_map;

    #[test]
    fn plain_output_without_colors() {
        let theme = default_theme_map();
        let mut out = Vec::new();
        print_error_message(&mut out, "boom", &theme, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Error: boom\n");
    }

    #[test]
    fn colored_output_contains_escape_codes() {
        let theme = default_theme_map();
        let painted = paint("0.001", ThemeEntry::Significant, &theme, true);
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("0.001"));
        assert_eq!(paint("w", ThemeEntry::Word, &theme, true), "w");
    }
}
