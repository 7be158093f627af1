//! Console colour theme.
//!
//! Each logical part of the output maps to an optional 16-colour ANSI
//! foreground. A YAML theme file may override any entry; missing entries
//! fall back to the defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The styled parts of the console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Info,
    Warn,
    Error,
    /// A p-value below the significance level.
    Significant,
    /// A p-value at or above the significance level.
    NotSignificant,
    Word,
    /// A chunk flagged as unusually large or small.
    Anomaly,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 8] = [
        ThemeEntry::Header,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Significant,
        ThemeEntry::NotSignificant,
        ThemeEntry::Word,
        ThemeEntry::Anomaly,
    ];
}

/// A named ANSI colour such as `red` or `brightgreen`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeColorError(String);

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color '{}'; expected one of: {}.",
            self.0,
            COLOR_NAMES.join(", ")
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

const COLOR_NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "brightblack",
    "brightred",
    "brightgreen",
    "brightyellow",
    "brightblue",
    "brightmagenta",
    "brightcyan",
    "brightwhite",
];

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if COLOR_NAMES.contains(&lower.as_str()) {
            Ok(ThemeColor(lower))
        } else {
            Err(ParseThemeColorError(s.to_string()))
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.0
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor(name.to_string())
    }

    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle {
            fg: Some(ThemeColor::named(name)),
        }
    }
}

/// Loads `theme_path` over the defaults, or returns the defaults.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => load_theme_file(path),
        None => Ok(default_theme_map()),
    }
}

pub fn load_theme_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file {}", path.display()))?;
    let custom: ThemeMap = serde_yml::from_str(&text)
        .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

    let mut theme = default_theme_map();
    theme.extend(custom);
    Ok(theme)
}

pub fn default_theme_map() -> ThemeMap {
    let mut theme = HashMap::new();
    theme.insert(ThemeEntry::Header, ThemeStyle::fg("brightwhite"));
    theme.insert(ThemeEntry::Info, ThemeStyle::fg("cyan"));
    theme.insert(ThemeEntry::Warn, ThemeStyle::fg("yellow"));
    theme.insert(ThemeEntry::Error, ThemeStyle::fg("red"));
    theme.insert(ThemeEntry::Significant, ThemeStyle::fg("brightred"));
    theme.insert(ThemeEntry::NotSignificant, ThemeStyle::fg("brightblack"));
    theme.insert(ThemeEntry::Anomaly, ThemeStyle::fg("yellow"));
    for entry in ThemeEntry::ALL {
        theme.entry(entry).or_default();
    }
    theme
}
