//! Configuration types for bjamlog
//!
//! Defines:
//! - `Settings` - Everything `.bjamlog/config.toml` can hold
//! - `ReportSettings` / `BehaviorSettings` - Its two sections
//! - `SettingsOverrides` - Command-line values layered on top

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

/// Global settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// How reports are rendered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportSettings {
    #[serde(default)]
    pub format: ReportFormat,

    #[serde(default)]
    pub color: ColorMode,

    /// Print the captured compiler output under each failure
    #[serde(default = "default_true")]
    pub show_details: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            color: ColorMode::default(),
            show_details: true,
        }
    }
}

/// When the outer build should be told to stop
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    #[serde(default = "default_true")]
    pub fail_on_failures: bool,

    #[serde(default)]
    pub fail_on_unknown: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            fail_on_failures: true,
            fail_on_unknown: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Terminal colour policy for the text report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against stdout: `auto` colours only a terminal
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "invalid color mode '{other}' (expected auto, always or never)"
            )),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

/// Command-line values; `None` keeps what the file said
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub format: Option<ReportFormat>,
    pub color: Option<ColorMode>,
    pub show_details: Option<bool>,
    pub fail_on_failures: Option<bool>,
    pub fail_on_unknown: Option<bool>,
}

impl Settings {
    /// Layer command-line overrides on top of file settings
    pub fn apply(&mut self, overrides: &SettingsOverrides) {
        if let Some(format) = overrides.format {
            self.report.format = format;
        }
        if let Some(color) = overrides.color {
            self.report.color = color;
        }
        if let Some(show_details) = overrides.show_details {
            self.report.show_details = show_details;
        }
        if let Some(fail) = overrides.fail_on_failures {
            self.behavior.fail_on_failures = fail;
        }
        if let Some(fail) = overrides.fail_on_unknown {
            self.behavior.fail_on_unknown = fail;
        }
    }
}
