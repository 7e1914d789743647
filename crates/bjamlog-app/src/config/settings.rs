//! Settings parser for .bjamlog/config.toml

use super::types::Settings;
use bjamlog_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const BJAMLOG_DIR: &str = ".bjamlog";

/// Location of the settings file for `base_dir`
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(BJAMLOG_DIR).join(CONFIG_FILENAME)
}

/// Load settings from `<base_dir>/.bjamlog/config.toml`
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(base_dir: &Path) -> Settings {
    let config_path = config_path(base_dir);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load settings from a file named explicitly by the user
///
/// Unlike [`load_settings`], problems are reported instead of falling back
/// to defaults.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;

    let settings = toml::from_str(&content)
        .map_err(|e| Error::config_invalid(format!("{}: {}", path.display(), e)))?;

    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Default config file contents, with every option spelled out
pub fn generate_default_config() -> String {
    r#"# bjamlog configuration

[report]
# text | json
format = "text"
# auto | always | never
color = "auto"
# print captured compiler output under each failure
show_details = true

[behavior]
# exit non-zero when any failure was recorded
fail_on_failures = true
# exit non-zero when the log ended without a build outcome
fail_on_unknown = false
"#
    .to_string()
}
