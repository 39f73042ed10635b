//! Static pattern tables for lesson extraction.
//!
//! Each table is ordered; callers that derive a value from a table use the
//! first pattern that matches.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// A regex with a human-readable label.
#[derive(Debug)]
pub struct Signal {
    /// The regex pattern to match.
    pub pattern: Regex,
    /// Human-readable description of the signal.
    pub description: &'static str,
}

impl Signal {
    fn new(pattern: &str, description: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("static regex"),
            description,
        }
    }

    /// Returns true if the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Returns true if any signal in `signals` matches `text`.
#[must_use]
pub fn any_match(signals: &[Signal], text: &str) -> bool {
    signals.iter().any(|s| s.is_match(text))
}

/// Words that indicate something went wrong.
pub static PROBLEM_SIGNALS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(
            r"(?i)(didn't work|not working|broken|failed|error)",
            "failure words",
        ),
        Signal::new(
            r"(?i)(blank page|nothing shows|not appearing)",
            "missing output",
        ),
        Signal::new(
            r"(?i)(build error|compilation error|syntax error)",
            "build failure",
        ),
        Signal::new(
            r"(?i)(constraint error|autolayout|layout issue)",
            "layout failure",
        ),
        Signal::new(r"(?i)(crash|exception|fatal error)", "crash"),
    ]
});

/// Words that indicate the problem was resolved.
pub static SOLUTION_SIGNALS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(r"(?i)(fixed by|resolved by|solution was)", "explicit fix"),
        Signal::new(r"(?i)(turns out|actually need to|found out)", "discovery"),
        Signal::new(r"(?i)(working now|solved|got it working)", "confirmation"),
        Signal::new(r"(?i)(the issue was|root cause)", "diagnosis"),
        Signal::new(
            r"(?i)(added|changed|modified|updated).*and.*work",
            "change then works",
        ),
    ]
});

/// "What was being built" patterns for chat spans. Capture group `ctx`.
pub static CHAT_CONTEXT_PATTERNS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(
            r"(?im)(?:implementing|building|creating|working on|adding)\s+(?P<ctx>.+?)(?:\.|,|$)",
            "activity",
        ),
        Signal::new(
            r"(?im)(?:trying to|attempting to)\s+(?P<ctx>.+?)(?:\.|,|$)",
            "attempt",
        ),
        Signal::new(
            r"(?im)\b(?:for|in|on)\s+(?P<ctx>.*?(?:page|view|component|feature|wizard))(?:\.|,|$)",
            "surface",
        ),
    ]
});

/// Time-spent patterns. Capture groups `n` and `unit`.
pub static TIME_PATTERNS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(
            r"(?i)(?:spent|took|wasted).*?(?P<n>\d+)\s*(?P<unit>hour|minute|min)s?",
            "spent N",
        ),
        Signal::new(
            r"(?i)(?P<n>\d+)\s*(?P<unit>hour|minute|min)s?.*?(?:debug|fix|solve)",
            "N to fix",
        ),
        Signal::new(
            r"(?i)(?:finally|eventually).*?(?P<n>\d+)\s*(?P<unit>hour|minute|min)s?",
            "finally after N",
        ),
    ]
});

/// Source file references.
pub static FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[\w./-]*\w\.(?:swift|rs|ts|tsx|js|jsx|py|go|kt|java|mm|m|h|c|cpp|rb|cs)\b",
    )
    .expect("static regex: file reference")
});

/// Sentence boundaries used to pick problem and solution sentences.
pub static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("static regex: sentence split"));

/// Commit subjects that describe a fix. Capture group `target`.
pub static COMMIT_FIX_PATTERNS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(
            r"(?i)\b(?:fix|resolve|correct|repair)(?:\([^)]*\))?:\s*(?P<target>.+)",
            "fix: prefix",
        ),
        Signal::new(
            r"(?i)\b(?:build\s+fix|bug\s+fix|ui\s+fix):\s*(?P<target>.+)",
            "typed fix prefix",
        ),
        Signal::new(
            r"(?i)\b(?:address|handle|solve)\s+(?P<target>.+?)\s+(?:issue|error|problem)",
            "address issue",
        ),
        Signal::new(
            r"(?i)\b(?:update|change|modify)\s+(?P<target>.+?)\s+to\s+(?:fix|resolve|correct)",
            "change to fix",
        ),
    ]
});

/// "What was being built" patterns for commit subjects. Capture group `ctx`.
pub static COMMIT_CONTEXT_PATTERNS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(
            r"(?i)(?:implementing|building|creating|adding)\s+(?P<ctx>.+?)(?:$|\s+-)",
            "activity",
        ),
        Signal::new(
            r"(?i)\b(?:for|in|on)\s+(?P<ctx>.*?(?:page|view|component|feature|wizard))(?:$|\s+-)",
            "surface",
        ),
    ]
});

/// Error descriptions inside commit subjects.
pub static COMMIT_PROBLEM_PATTERNS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(r"(?i)blank page|nothing shows|not appearing", "missing output"),
        Signal::new(
            r"(?i)build error|compilation error|syntax error",
            "build failure",
        ),
        Signal::new(
            r"(?i)constraint error|autolayout issue|layout problem",
            "layout failure",
        ),
        Signal::new(
            r"(?i)navigation.*?(?:not working|broken|failed)",
            "navigation failure",
        ),
        Signal::new(r"(?i)missing|undefined|not found", "missing symbol"),
    ]
});

/// Solution phrases inside commit subjects.
pub static COMMIT_SOLUTION_PATTERNS: LazyLock<Vec<Signal>> = LazyLock::new(|| {
    vec![
        Signal::new(r"(?i)(?:added|implemented|created|updated)\s+.+", "addition"),
        Signal::new(r"(?i)(?:changed|modified|fixed)\s+.+?\s+to\s+.+", "change"),
        Signal::new(
            r"(?i)(?:now\s+using|switched\s+to|replaced\s+with)\s+.+",
            "replacement",
        ),
    ]
});
