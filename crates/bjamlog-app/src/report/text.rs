//! Plain-text summary report.
//!
//! ```text
//! Summary :
//! ---------
//!   1 failed
//!   0 unknown
//!   2 passed
//!
//! 1: libboost_system.so
//! 2: foo.o
//! <captured compiler output>
//! 3: any_test
//! ```
//!
//! Counts come first in a fixed order, then every record in discovery
//! order. Failed records are followed by their captured output.

use std::io::Write;

use crossterm::style::{style, Color, Stylize};

use bjamlog_core::prelude::*;
use bjamlog_core::{Category, ParseOutcome, Severity, Summary};

use super::ReportFormatter;

#[derive(Debug, Clone)]
pub struct TextReport {
    color: bool,
    show_details: bool,
}

impl TextReport {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            show_details: true,
        }
    }

    pub fn show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }

    /// Write the report for `summary` to `out`
    pub fn write_summary(&self, summary: &Summary, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Summary :")?;
        writeln!(out, "---------")?;
        for (category, count, _) in summary.entries() {
            writeln!(out, "  {} {}", count, category)?;
        }
        writeln!(out)?;

        for (category, record) in summary.chronological() {
            let severity = category.severity();
            match category {
                Category::Failed => {
                    let line = format!("{}: {}", record.sequence, record.label);
                    writeln!(out, "{}", self.paint(severity, line))?;
                    if self.show_details {
                        writeln!(out, "{}", record.detail)?;
                    }
                }
                Category::Passed | Category::Unknown => {
                    let line = format!("{}: {}{}", record.sequence, record.label, record.detail);
                    writeln!(out, "{}", self.paint(severity, line))?;
                }
            }
        }

        Ok(())
    }

    fn paint(&self, severity: Severity, text: String) -> String {
        if !self.color {
            return text;
        }

        let color = match severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Info => Color::Cyan,
        };
        style(text).with(color).to_string()
    }
}

impl ReportFormatter for TextReport {
    fn render(&self, outcome: &ParseOutcome, out: &mut dyn Write) -> Result<()> {
        self.write_summary(&outcome.summary, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bjamlog_core::ParseSession;

    fn summary_of(lines: &[&str]) -> Summary {
        let mut session = ParseSession::new();
        for line in lines {
            session.feed_line(line);
        }
        session.finish();
        session.into_summary()
    }

    fn render(report: &TextReport, summary: &Summary) -> String {
        let mut out = Vec::new();
        report.write_summary(summary, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_report_layout() {
        let summary = summary_of(&[
            "common.copy stage/lib/libfoo.so",
            "g++ -c bar.cpp",
            "bar.cpp:1: error: nope",
            "...failed gcc.compile.c++ bin/bar.o...",
            "**passed** bin/baz_test.test",
            "...found 3 targets...",
        ]);

        let output = render(&TextReport::new(false), &summary);
        assert_eq!(
            output,
            "Summary :\n\
             ---------\n\
             \x20 1 failed\n\
             \x20 1 unknown\n\
             \x20 2 passed\n\
             \n\
             1: libfoo.so\n\
             2: bar.o\n\
             g++ -c bar.cpp\n\
             bar.cpp:1: error: nope\n\
             \n\
             3: baz_test\n\
             4: WTF ? oO\n"
        );
    }

    #[test]
    fn test_failed_without_detail_prints_empty_line() {
        let summary = summary_of(&[]);
        let output = render(&TextReport::new(false), &summary);
        assert!(output.ends_with(
            "1: Malformed file: truncated ? not a bjam log file ?\n\n"
        ));
    }

    #[test]
    fn test_details_can_be_hidden() {
        let summary = summary_of(&[
            "g++ -c bar.cpp",
            "...failed gcc.compile.c++ bin/bar.o...",
            "...updated 0 targets...",
        ]);
        let output = render(&TextReport::new(false).show_details(false), &summary);
        assert!(output.ends_with("1: bar.o\n"));
        assert!(!output.contains("g++ -c bar.cpp"));
    }

    const RED: &str = "\x1b[38;5;9m";
    const YELLOW: &str = "\x1b[38;5;11m";
    const CYAN: &str = "\x1b[38;5;14m";
    const RESET: &str = "\x1b[39m";

    #[test]
    fn test_colour_follows_severity() {
        // crossterm honours NO_COLOR globally
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            return;
        }

        let summary = summary_of(&[
            "common.copy stage/lib/libfoo.so",
            "g++ -c bar.cpp",
            "...failed gcc.compile.c++ bin/bar.o...",
            "...found 3 targets...",
        ]);
        let output = render(&TextReport::new(true), &summary);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            &lines[..5],
            &["Summary :", "---------", "  1 failed", "  1 unknown", "  1 passed"]
        );
        assert_eq!(lines[6], format!("{CYAN}1: libfoo.so{RESET}"));
        assert_eq!(lines[7], format!("{RED}2: bar.o{RESET}"));
        assert_eq!(lines[8], "g++ -c bar.cpp");
        assert_eq!(lines[10], format!("{YELLOW}3: WTF ? oO{RESET}"));
    }

    #[test]
    fn test_no_colour_emits_no_escapes() {
        let summary = summary_of(&["common.copy stage/lib/libfoo.so", "...found 1 target..."]);
        let output = render(&TextReport::new(false), &summary);
        assert!(!output.contains('\x1b'));
    }
}
