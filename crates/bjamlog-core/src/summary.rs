//! Classified build events and the per-category registries.

use serde::Serialize;
use std::fmt;

/// Registry a record was filed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Passed,
    Failed,
    Unknown,
}

impl Category {
    /// All categories in report order
    pub const ALL: [Category; 3] = [Category::Failed, Category::Unknown, Category::Passed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Passed => "passed",
            Category::Failed => "failed",
            Category::Unknown => "unknown",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Category::Passed => Severity::Info,
            Category::Failed => Severity::Error,
            Category::Unknown => Severity::Warning,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity a category is reported at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One classified build event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Discovery order, shared by all registries, starting at 1
    pub sequence: u64,

    /// Library, test or target name; the raw line when nothing better was found
    pub label: String,

    /// Compiler output captured for the event, empty when there is none
    pub detail: String,
}

impl EventRecord {
    pub fn new(sequence: u64, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            sequence,
            label: label.into(),
            detail: detail.into(),
        }
    }
}

/// Read-only snapshot of a finished parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    passed: Vec<EventRecord>,
    failed: Vec<EventRecord>,
    unknown: Vec<EventRecord>,
}

impl Summary {
    pub(crate) fn from_registries(
        passed: Vec<EventRecord>,
        failed: Vec<EventRecord>,
        unknown: Vec<EventRecord>,
    ) -> Self {
        Self {
            passed,
            failed,
            unknown,
        }
    }

    /// Records of one category in discovery order
    pub fn records(&self, category: Category) -> &[EventRecord] {
        match category {
            Category::Passed => &self.passed,
            Category::Failed => &self.failed,
            Category::Unknown => &self.unknown,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.records(category).len()
    }

    pub fn passed(&self) -> usize {
        self.passed.len()
    }

    pub fn failed(&self) -> usize {
        self.failed.len()
    }

    pub fn unknown(&self) -> usize {
        self.unknown.len()
    }

    pub fn total(&self) -> usize {
        self.passed() + self.failed() + self.unknown()
    }

    /// No failed and no unknown records
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.unknown.is_empty()
    }

    /// `category -> (count, records)` in report order
    pub fn entries(&self) -> impl Iterator<Item = (Category, usize, &[EventRecord])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.count(category), self.records(category)))
    }

    /// All records merged by sequence number
    pub fn chronological(&self) -> Vec<(Category, &EventRecord)> {
        let mut history: Vec<(Category, &EventRecord)> = Category::ALL
            .into_iter()
            .flat_map(|category| self.records(category).iter().map(move |r| (category, r)))
            .collect();
        history.sort_by_key(|(_, record)| record.sequence);
        history
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed, {} unknown, {} passed",
            self.failed(),
            self.unknown(),
            self.passed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Summary {
        Summary::from_registries(
            vec![
                EventRecord::new(1, "libfoo.so", ""),
                EventRecord::new(4, "bar_test", ""),
            ],
            vec![EventRecord::new(2, "baz.o", "g++ -c baz.cpp\n")],
            vec![EventRecord::new(3, "WTF ? oO", "")],
        )
    }

    #[test]
    fn test_counts() {
        let summary = sample();
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.unknown(), 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.count(Category::Passed), 2);
        assert!(!summary.is_clean());
        assert!(Summary::default().is_clean());
    }

    #[test]
    fn test_chronological_interleaves_categories() {
        let summary = sample();
        let order: Vec<(Category, u64)> = summary
            .chronological()
            .into_iter()
            .map(|(c, r)| (c, r.sequence))
            .collect();
        assert_eq!(
            order,
            vec![
                (Category::Passed, 1),
                (Category::Failed, 2),
                (Category::Unknown, 3),
                (Category::Passed, 4),
            ]
        );
    }

    #[test]
    fn test_entries_in_report_order() {
        let summary = sample();
        let entries: Vec<(Category, usize)> =
            summary.entries().map(|(c, n, _)| (c, n)).collect();
        assert_eq!(
            entries,
            vec![
                (Category::Failed, 1),
                (Category::Unknown, 1),
                (Category::Passed, 2)
            ]
        );
    }

    #[test]
    fn test_category_names_and_severity() {
        assert_eq!(Category::Failed.to_string(), "failed");
        assert_eq!(Category::Failed.severity(), Severity::Error);
        assert_eq!(Category::Unknown.severity(), Severity::Warning);
        assert_eq!(Category::Passed.severity(), Severity::Info);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "1 failed, 1 unknown, 2 passed");
    }
}
