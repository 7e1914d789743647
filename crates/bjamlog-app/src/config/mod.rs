//! Configuration file parsing for bjamlog
//!
//! Supports `.bjamlog/config.toml` in the working directory, or any file
//! passed with `--config`.

pub mod settings;
pub mod types;

pub use settings::{config_path, generate_default_config, load_settings, load_settings_file};
pub use types::*;
