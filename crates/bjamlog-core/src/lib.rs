//! # bjamlog-core - bjam/b2 Build Log Classification
//!
//! Foundation crate for bjamlog. Reads a bjam/b2 console transcript line by
//! line, classifies each line, captures the compiler output around failures
//! and files the resulting events into three registries (passed, failed,
//! unknown) that share one discovery-order sequence.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Capture (`recorder`)
//! - [`Recorder`] - On/off buffer holding the current compiler output span
//!
//! ### Classification (`classify`)
//! - [`classify_line()`] - Ordered first-match rule table over a single line
//! - [`LineKind`] - Terminal statuses plus capture-control outcomes
//!
//! ### Parsing (`session`, `parser`)
//! - [`ParseSession`] - Per-log state: recorder, registries, sequence counter
//! - [`BjamLogParser`] - Opens a log file and runs a session to completion
//! - [`ParseOutcome`] - Path, overall success flag and [`Summary`]
//!
//! ### Results (`summary`)
//! - [`Summary`] - Read-only registries with counts and chronological merge
//! - [`EventRecord`], [`Category`], [`Severity`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum; in-log anomalies are data, never errors
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use bjamlog_core::prelude::*;
//! ```

pub mod classify;
pub mod error;
pub mod logging;
pub mod parser;
pub mod recorder;
pub mod session;
pub mod summary;

/// Prelude for common imports used throughout all bjamlog crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use classify::{classify_line, LineKind};
pub use error::{Error, Result, ResultExt};
pub use parser::{BjamLogParser, ParseOutcome};
pub use recorder::Recorder;
pub use session::{ParseSession, MALFORMED_LOG_LABEL, UNKNOWN_OUTCOME_LABEL};
pub use summary::{Category, EventRecord, Severity, Summary};
