//! Line classification for bjam/b2 console transcripts.
//!
//! Every line of a build log maps to exactly one [`LineKind`]. The rules are
//! kept in a single ordered table and evaluated first-match-wins, so the
//! precedence between overlapping markers (a `...failed` line that is also
//! a summary line, an `error:` line that opens a compiler block, ...) is
//! visible in one place.
//!
//! The label extractors turn a status line into the short module/target
//! name used in the report.

use regex::Regex;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Markers
// ─────────────────────────────────────────────────────────────────────────────

pub const FAILED_PREFIX: &str = "...failed";
pub const FAILED_TO_WRITE_PREFIX: &str = "failed to write";
pub const PASSED_PREFIX: &str = "**passed**";
pub const COPY_PREFIX: &str = "common.copy";
pub const BUILD_SUCCESS_MARKER: &str = "The Boost C++ Libraries were successfully built!";
pub const BEGIN_OUTPUT_PREFIX: &str = "====== BEGIN OUTPUT ======";
pub const END_OUTPUT_PREFIX: &str = "====== END OUTPUT ======";
pub const ERROR_PREFIX: &str = "error:";
pub const FOUND_PREFIX: &str = "...found";
pub const UPDATED_PREFIX: &str = "...updated";

/// MSVC invocations are echoed one per source file; they extend the running
/// capture instead of restarting it.
pub const MSVC_PREFIX: &str = "cl";

/// bjam's closing tally, e.g. `...failed updating 3 targets...`
static FAILED_UPDATING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.\.\.failed updating [0-9]+ targets?\.\.\.$")
        .expect("FAILED_UPDATING_REGEX pattern is valid")
});

static COMPILER_INVOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"?((g|clang)\+\+|cl|msvc|compile-c-c\+\+)"#)
        .expect("COMPILER_INVOCATION_REGEX pattern is valid")
});

static LIBRARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"lib[a-zA-Z0-9_-]+\.(a|so|lib|dll)$").expect("LIBRARY_REGEX pattern is valid")
});

static UNITTEST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9_]+)\.test$").expect("UNITTEST_REGEX pattern is valid")
});

static FAILED_TARGET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9_]+(\.(o(bj)?|run|exe|pdb))?)\.\.\.$")
        .expect("FAILED_TARGET_REGEX pattern is valid")
});

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of classifying a single log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `...failed <action> <target>...` for a single target
    FailureUnittest,

    /// `failed to write ...`
    Failure,

    /// `**passed** .../<name>.test`
    SuccessUnittest,

    /// `common.copy .../libfoo.so`
    SuccessLib,

    /// The whole build reported success
    Success,

    /// Compiler invocation, `====== BEGIN OUTPUT ======` or `error:`
    CompileBlockStart,

    /// `====== END OUTPUT ======`
    CompileBlockEnd,

    /// Anything else
    Continuation,
}

impl LineKind {
    /// Terminal kinds carry a build status; the others only drive capture
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LineKind::FailureUnittest
                | LineKind::Failure
                | LineKind::SuccessUnittest
                | LineKind::SuccessLib
                | LineKind::Success
        )
    }
}

struct Rule {
    kind: LineKind,
    matches: fn(&str) -> bool,
}

/// Evaluated top to bottom, first match wins.
const RULES: &[Rule] = &[
    Rule {
        kind: LineKind::FailureUnittest,
        matches: is_failed_target,
    },
    Rule {
        kind: LineKind::Failure,
        matches: is_write_failure,
    },
    Rule {
        kind: LineKind::SuccessUnittest,
        matches: is_passed_test,
    },
    Rule {
        kind: LineKind::SuccessLib,
        matches: is_library_copy,
    },
    Rule {
        kind: LineKind::Success,
        matches: is_build_success,
    },
    Rule {
        kind: LineKind::CompileBlockStart,
        matches: is_block_start,
    },
    Rule {
        kind: LineKind::CompileBlockEnd,
        matches: is_block_end,
    },
];

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Classify a line (without its line terminator). Total over all input.
pub fn classify_line(line: &str) -> LineKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map(|rule| rule.kind)
        .unwrap_or(LineKind::Continuation)
}

fn is_failed_target(line: &str) -> bool {
    line.starts_with(FAILED_PREFIX) && !FAILED_UPDATING_REGEX.is_match(line)
}

fn is_write_failure(line: &str) -> bool {
    line.starts_with(FAILED_TO_WRITE_PREFIX)
}

fn is_passed_test(line: &str) -> bool {
    line.starts_with(PASSED_PREFIX)
}

fn is_library_copy(line: &str) -> bool {
    line.starts_with(COPY_PREFIX)
}

fn is_build_success(line: &str) -> bool {
    line.contains(BUILD_SUCCESS_MARKER)
}

fn is_block_start(line: &str) -> bool {
    COMPILER_INVOCATION_REGEX.is_match(line)
        || line.starts_with(BEGIN_OUTPUT_PREFIX)
        || line.starts_with(ERROR_PREFIX)
}

fn is_block_end(line: &str) -> bool {
    line.starts_with(END_OUTPUT_PREFIX)
}

/// Literal MSVC carve-out: a block start that must not stop the running capture
pub fn is_msvc_invocation(line: &str) -> bool {
    line.starts_with(MSVC_PREFIX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Label Extraction
// ─────────────────────────────────────────────────────────────────────────────

/// `common.copy stage/lib/libboost_system.so` -> `libboost_system.so`
pub fn library_name(line: &str) -> Option<&str> {
    LIBRARY_REGEX.find(line).map(|m| m.as_str())
}

/// `**passed** bin.v2/.../any_test.test` -> `any_test`
pub fn unittest_name(line: &str) -> Option<&str> {
    UNITTEST_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `...failed testing.capture-output bin.v2/.../foo_test.run...` -> `foo_test.run`
///
/// Program database targets are reported under their executable name.
pub fn failed_target(line: &str) -> Option<String> {
    let target = FAILED_TARGET_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))?
        .as_str();

    Some(match target.strip_suffix(".pdb") {
        Some(stem) => format!("{stem}.exe"),
        None => target.to_string(),
    })
}
