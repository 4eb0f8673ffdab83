//! Failure-indicator detection over aggregated transcript text.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Indicator literals in priority order. When several match, the earliest
/// entry here names the failure, regardless of where it sits in the text.
pub const INDICATOR_LITERALS: [&str; 12] = [
    "Error:",
    "TypeError:",
    "ReferenceError:",
    "SyntaxError:",
    "AssertionError:",
    "failed",
    "ENOENT",
    "EACCES",
    "Cannot find module",
    "Cannot read properties",
    "Uncaught",
    "Exception",
];

/// One entry of the ordered indicator table.
#[derive(Debug)]
pub struct Indicator {
    pub literal: &'static str,
    pub kind: String,
    pattern: Regex,
}

static INDICATORS: LazyLock<Vec<Indicator>> = LazyLock::new(|| {
    INDICATOR_LITERALS
        .iter()
        .map(|&literal| Indicator {
            literal,
            kind: failure_kind_from(literal),
            pattern: RegexBuilder::new(&regex::escape(literal))
                .case_insensitive(true)
                .build()
                .unwrap(),
        })
        .collect()
});

/// A matched indicator and where it matched in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub literal: &'static str,
    pub failure_kind: String,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorDetector {
    indicators: &'static [Indicator],
}

impl Default for ErrorDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorDetector {
    pub fn new() -> Self {
        Self {
            indicators: INDICATORS.as_slice(),
        }
    }

    pub fn indicators(&self) -> &'static [Indicator] {
        self.indicators
    }

    /// True when any indicator occurs anywhere in `text`.
    pub fn has_signal(&self, text: &str) -> bool {
        self.indicators
            .iter()
            .any(|indicator| indicator.pattern.is_match(text))
    }

    /// Pick the highest-priority indicator present in `text`.
    ///
    /// The table is walked in priority order and the first indicator with any
    /// match wins, even if a lower-priority one occurs earlier in the text.
    pub fn detect(&self, text: &str) -> Option<Detection> {
        if !self.has_signal(text) {
            return None;
        }

        self.indicators.iter().find_map(|indicator| {
            indicator.pattern.find(text).map(|found| Detection {
                literal: indicator.literal,
                failure_kind: indicator.kind.clone(),
                start: found.start(),
                end: found.end(),
            })
        })
    }
}

/// Lowercase, drop the trailing colon, and remove whitespace:
/// `"TypeError:"` -> `"typeerror"`, `"Cannot find module"` -> `"cannotfindmodule"`.
pub fn failure_kind_from(matched: &str) -> String {
    let trimmed = matched.trim();
    let trimmed = trimmed.strip_suffix(':').unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
