//! Report rendering for parsed logs
//!
//! - [`TextReport`] - Human-readable summary, coloured by severity
//! - [`JsonReport`] - One JSON document per log for machine consumers

pub mod json;
pub mod text;

pub use json::JsonReport;
pub use text::TextReport;

use std::io::Write;

use bjamlog_core::prelude::*;
use bjamlog_core::ParseOutcome;

use crate::config::{ReportFormat, ReportSettings};

/// Renders one parse outcome
pub trait ReportFormatter {
    fn render(&self, outcome: &ParseOutcome, out: &mut dyn Write) -> Result<()>;
}

/// Pick the formatter the settings ask for
pub fn formatter_for(settings: &ReportSettings) -> Box<dyn ReportFormatter> {
    match settings.format {
        ReportFormat::Text => Box::new(
            TextReport::new(settings.color.enabled()).show_details(settings.show_details),
        ),
        ReportFormat::Json => Box::new(JsonReport::new()),
    }
}
