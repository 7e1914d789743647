//! # bjamlog-app - Settings, Reports and Run Orchestration
//!
//! Sits between the CLI and [`bjamlog_core`]: loads `.bjamlog/config.toml`,
//! runs the parser over each log, renders reports, and turns the totals
//! into a pass/fail verdict for the calling build.
//!
//! ## Public API
//!
//! - [`config`] - [`Settings`], loading and command-line overrides
//! - [`report`] - [`TextReport`], [`JsonReport`] behind [`ReportFormatter`]
//! - [`run()`] / [`RunVerdict`] - Batch parsing and the exit decision

pub mod config;
pub mod report;
pub mod run;

pub use config::{
    load_settings, load_settings_file, BehaviorSettings, ColorMode, ReportFormat, ReportSettings,
    Settings, SettingsOverrides,
};
pub use report::{formatter_for, JsonReport, ReportFormatter, TextReport};
pub use run::{run, RunVerdict};
