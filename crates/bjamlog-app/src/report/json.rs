//! JSON report - one document per parsed log
//!
//! Output is NDJSON: each log produces exactly one line, so several logs can
//! be streamed to the same consumer.
//!
//! ```json
//! {"path":"logs/build.log","build_passed":false,"failed":1,"unknown":0,"passed":1,"records":[{"sequence":1,"category":"passed","severity":"info","label":"libfoo.so","detail":""},...],"timestamp":1704700001000}
//! ```

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use bjamlog_core::prelude::*;
use bjamlog_core::{Category, ParseOutcome, Severity};

use super::ReportFormatter;

#[derive(Debug, Clone, Default)]
pub struct JsonReport;

/// Serialized shape of one log
#[derive(Debug, Serialize)]
pub struct JsonDocument<'a> {
    pub path: &'a Path,
    pub build_passed: bool,
    pub failed: usize,
    pub unknown: usize,
    pub passed: usize,
    pub records: Vec<JsonRecord<'a>>,
    pub timestamp: i64,
}

/// A record tagged with its category, in discovery order
#[derive(Debug, Serialize)]
pub struct JsonRecord<'a> {
    pub sequence: u64,
    pub category: Category,
    pub severity: Severity,
    pub label: &'a str,
    pub detail: &'a str,
}

impl JsonReport {
    pub fn new() -> Self {
        Self
    }

    pub fn document<'a>(&self, outcome: &'a ParseOutcome) -> JsonDocument<'a> {
        let summary = &outcome.summary;
        let records = summary
            .chronological()
            .into_iter()
            .map(|(category, record)| JsonRecord {
                sequence: record.sequence,
                category,
                severity: category.severity(),
                label: &record.label,
                detail: &record.detail,
            })
            .collect();

        JsonDocument {
            path: &outcome.path,
            build_passed: outcome.build_passed,
            failed: summary.failed(),
            unknown: summary.unknown(),
            passed: summary.passed(),
            records,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

impl ReportFormatter for JsonReport {
    fn render(&self, outcome: &ParseOutcome, out: &mut dyn Write) -> Result<()> {
        let json = serde_json::to_string(&self.document(outcome))?;
        writeln!(out, "{}", json)?;
        Ok(())
    }
}
