//! Line-by-line parse session over a bjam/b2 transcript.
//!
//! A [`ParseSession`] owns everything one log needs: the capture
//! [`Recorder`], the three registries and the sequence counter they share.
//! Feed it lines with [`ParseSession::feed_line`], then call
//! [`ParseSession::finish`] to resolve how the stream ended.

use std::io::BufRead;

use crate::classify::{
    classify_line, failed_target, is_msvc_invocation, library_name, unittest_name, LineKind,
    ERROR_PREFIX, FOUND_PREFIX, UPDATED_PREFIX,
};
use crate::prelude::*;
use crate::recorder::Recorder;
use crate::summary::{Category, EventRecord, Summary};

/// Label of the synthetic failure filed for logs that end abruptly
pub const MALFORMED_LOG_LABEL: &str = "Malformed file: truncated ? not a bjam log file ?";

/// Label filed when bjam only reported what it found and never built anything
pub const UNKNOWN_OUTCOME_LABEL: &str = "WTF ? oO";

/// State of a single parse. Construct a new one for every log.
#[derive(Debug)]
pub struct ParseSession {
    /// Last non-blank line seen, without terminator
    lastline: String,

    /// Set once the overall success marker was seen
    build_passed: bool,

    /// Next sequence number to hand out
    counter: u64,

    recorder: Recorder,

    passed: Vec<EventRecord>,
    failed: Vec<EventRecord>,
    unknown: Vec<EventRecord>,

    finished: bool,
}

impl ParseSession {
    pub fn new() -> Self {
        Self {
            lastline: String::new(),
            build_passed: false,
            counter: 1,
            recorder: Recorder::new(),
            passed: Vec::new(),
            failed: Vec::new(),
            unknown: Vec::new(),
            finished: false,
        }
    }

    /// Feed one physical line, with or without its `\n` / `\r\n` terminator.
    ///
    /// Blank lines are skipped entirely.
    pub fn feed_line(&mut self, raw: &str) {
        let line = strip_terminator(raw);
        if line.trim_end().is_empty() {
            return;
        }

        self.lastline.clear();
        self.lastline.push_str(line);

        let kind = classify_line(line);
        trace!(?kind, "{}", line);

        match kind {
            LineKind::CompileBlockStart => {
                if !is_msvc_invocation(line) {
                    self.recorder.stop();
                }
                self.recorder.start();
                self.capture(line);
            }
            LineKind::CompileBlockEnd => {
                self.capture(line);
                self.recorder.stop();
            }
            LineKind::Continuation => self.capture(line),
            _ => self.settle(kind, line),
        }
    }

    /// Resolve the end of the stream. Calling it again has no effect.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if self.build_passed {
            return;
        }

        if self.lastline.starts_with(FOUND_PREFIX) {
            self.register(Category::Unknown, UNKNOWN_OUTCOME_LABEL, "");
        } else if !self.lastline.starts_with(UPDATED_PREFIX) {
            let label = if self.lastline.starts_with(ERROR_PREFIX) {
                self.recorder.record().to_string()
            } else {
                MALFORMED_LOG_LABEL.to_string()
            };
            warn!("Log ended without a bjam summary: {:?}", self.lastline);
            self.register(Category::Failed, label, "");
        } else {
            // "...updated" without the success banner: nothing to file
            debug!("Log ended on {:?} without success marker", self.lastline);
        }
    }

    /// Consume a whole stream, then [`finish`](Self::finish).
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn read_from<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let chunk = String::from_utf8_lossy(&buf);
            // the empty piece after a `\r\n` is a blank line and gets skipped
            for line in chunk.split('\r') {
                self.feed_line(line);
            }
        }
        self.finish();
        Ok(())
    }

    pub fn build_passed(&self) -> bool {
        self.build_passed
    }

    /// Last non-blank line fed to the session
    pub fn last_line(&self) -> &str {
        &self.lastline
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Snapshot of the registries so far
    pub fn summary(&self) -> Summary {
        Summary::from_registries(
            self.passed.clone(),
            self.failed.clone(),
            self.unknown.clone(),
        )
    }

    pub fn into_summary(self) -> Summary {
        Summary::from_registries(self.passed, self.failed, self.unknown)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn capture(&mut self, line: &str) {
        if self.recorder.is_recording() {
            self.recorder.feed(line);
            self.recorder.feed("\n");
        }
    }

    /// Terminal statuses freeze the running capture before filing anything
    fn settle(&mut self, kind: LineKind, line: &str) {
        self.recorder.stop();

        match kind {
            LineKind::Success => {
                self.recorder.clear();
                self.build_passed = true;
                info!("Build reported success");
            }
            LineKind::SuccessLib => {
                self.recorder.clear();
                let label = library_name(line).unwrap_or(line).to_string();
                self.register(Category::Passed, label, "");
            }
            LineKind::SuccessUnittest => {
                self.recorder.clear();
                let label = unittest_name(line).unwrap_or(line).to_string();
                self.register(Category::Passed, label, "");
            }
            LineKind::FailureUnittest => {
                let label = failed_target(line).unwrap_or_else(|| line.to_string());
                let detail = self.recorder.record().to_string();
                self.register(Category::Failed, label, detail);
            }
            LineKind::Failure => {
                let detail = self.recorder.record().to_string();
                self.register(Category::Failed, line.to_string(), detail);
            }
            LineKind::CompileBlockStart | LineKind::CompileBlockEnd | LineKind::Continuation => {
                unreachable!("{kind:?} is not a terminal status")
            }
        }
    }

    fn register(&mut self, category: Category, label: impl Into<String>, detail: impl Into<String>) {
        let record = EventRecord::new(self.counter, label, detail);
        debug!("#{} {}: {}", record.sequence, category, record.label);

        let registry = match category {
            Category::Passed => &mut self.passed,
            Category::Failed => &mut self.failed,
            Category::Unknown => &mut self.unknown,
        };
        registry.push(record);
        self.counter += 1;
    }
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_terminator(raw: &str) -> &str {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    line.strip_suffix('\r').unwrap_or(line)
}
