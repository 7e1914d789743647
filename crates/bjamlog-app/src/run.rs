//! Parse a batch of logs, report each one, and decide whether the outer
//! build should stop.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use bjamlog_core::prelude::*;
use bjamlog_core::{BjamLogParser, ParseOutcome};

use crate::config::{BehaviorSettings, ReportFormat, Settings};
use crate::report::formatter_for;

/// Totals over every log of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunVerdict {
    pub files: usize,
    pub failed: usize,
    pub unknown: usize,
    pub passed: usize,

    /// Every log carried the success banner
    pub build_passed: bool,
}

impl RunVerdict {
    fn absorb(&mut self, outcome: &ParseOutcome) {
        self.build_passed = if self.files == 0 {
            outcome.build_passed
        } else {
            self.build_passed && outcome.build_passed
        };
        self.files += 1;
        self.failed += outcome.summary.failed();
        self.unknown += outcome.summary.unknown();
        self.passed += outcome.summary.passed();
    }

    /// Whether the caller should halt the outer build
    pub fn should_fail(&self, behavior: &BehaviorSettings) -> bool {
        (behavior.fail_on_failures && self.failed > 0)
            || (behavior.fail_on_unknown && self.unknown > 0)
    }
}

/// Parse and report every file in order.
///
/// All paths are checked before the first one is parsed, so a missing file
/// aborts the run without partial output.
pub fn run(files: &[PathBuf], settings: &Settings, out: &mut dyn Write) -> Result<RunVerdict> {
    let parsers = files
        .iter()
        .map(|path| BjamLogParser::new(path.clone()))
        .collect::<Result<Vec<_>>>()?;

    let formatter = formatter_for(&settings.report);
    let with_headers = parsers.len() > 1 && settings.report.format == ReportFormat::Text;
    let mut verdict = RunVerdict::default();

    for (index, parser) in parsers.iter().enumerate() {
        let outcome = parser.parse()?;

        if with_headers {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "==> {} <==", parser.path().display())?;
        }
        formatter.render(&outcome, out).map_err(|e| {
            Error::report(format!("{}: {}", parser.path().display(), e))
        })?;

        verdict.absorb(&outcome);
    }

    out.flush()?;
    info!(
        "Run finished: {} file(s), {} failed, {} unknown, {} passed",
        verdict.files, verdict.failed, verdict.unknown, verdict.passed
    );
    Ok(verdict)
}
