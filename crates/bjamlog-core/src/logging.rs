//! File logging through tracing
//!
//! stdout carries the report, so diagnostics only ever go to a daily
//! rolling file under the platform data directory.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "BJAMLOG_LOG";

/// Filter used when `BJAMLOG_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "bjamlog=info,warn";

const LOG_FILE_NAME: &str = "bjamlog.log";

/// Install the global subscriber.
///
/// ```bash
/// BJAMLOG_LOG=trace bjamlog -f build.log
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        "bjamlog {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(())
}

/// `<data_local_dir>/bjamlog/logs`, or `./bjamlog/logs` without a home
fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bjamlog")
        .join("logs")
}
