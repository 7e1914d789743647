//! File-level entry point for parsing a bjam/b2 log.

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::prelude::*;
use crate::session::ParseSession;
use crate::summary::Summary;

/// Parser bound to one log file on disk
#[derive(Debug, Clone)]
pub struct BjamLogParser {
    path: PathBuf,
}

/// Result of parsing one log file
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub path: PathBuf,
    pub build_passed: bool,
    pub summary: Summary,
}

impl BjamLogParser {
    /// Bind to `path`, failing with [`Error::InputNotFound`] if it does not exist
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::input_not_found(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file through a fresh [`ParseSession`]
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn parse(&self) -> Result<ParseOutcome> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut session = ParseSession::new();
        session.read_from(BufReader::new(file))?;

        let build_passed = session.build_passed();
        let summary = session.into_summary();
        info!("Parsed {}: {}", self.path.display(), summary);

        Ok(ParseOutcome {
            path: self.path.clone(),
            build_passed,
            summary,
        })
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::Category;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_input_not_found() {
        let temp = tempdir().unwrap();
        let err = BjamLogParser::new(temp.path().join("nope.log")).unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_parse_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("build.log");
        std::fs::write(
            &path,
            "common.copy stage/lib/libboost_atomic.a\n\
             \n\
             The Boost C++ Libraries were successfully built!\n",
        )
        .unwrap();

        let parser = BjamLogParser::new(&path).unwrap();
        let outcome = parser.parse().unwrap();
        assert!(outcome.build_passed);
        assert_eq!(outcome.path, path);
        assert_eq!(
            outcome.summary.records(Category::Passed)[0].label,
            "libboost_atomic.a"
        );
    }

    #[test]
    fn test_each_parse_is_a_fresh_session() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("build.log");
        std::fs::write(&path, "...failed gcc.compile.c++ foo.o...\n").unwrap();

        let parser = BjamLogParser::new(&path).unwrap();
        let first = parser.parse().unwrap();
        let second = parser.parse().unwrap();
        assert_eq!(first.summary, second.summary);
        // target failure + malformed tail
        assert_eq!(second.summary.failed(), 2);
        assert_eq!(second.summary.records(Category::Failed)[1].sequence, 2);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = ParseOutcome {
            path: PathBuf::from("logs/build.log"),
            build_passed: false,
            summary: Summary::default(),
        };
        assert_eq!(
            outcome.to_string(),
            "logs/build.log: 0 failed, 0 unknown, 0 passed"
        );
    }
}
