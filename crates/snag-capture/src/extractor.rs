//! Best-effort location hints (file, operation, module) from a failure snippet.

use std::sync::LazyLock;

use regex::Regex;
use snag_memory::ReflectionContext;

static FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:file://|\bat\s+(?:(?:async\s+)?[\w.$<>]+\s+\()?|\bin\s+)(?P<path>[^\s:()'"]*?)(?P<name>[\w-]+\.(?:jsx|tsx|js|ts))\b"#,
    )
    .unwrap()
});

static OPERATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\bat\s+)?(?P<name>\w+)\s*\(").unwrap());

static PREFIXED_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:\bmodule\s+['"]?|\bpackage\s+['"]?|\bfrom\s+['"]@?)(?P<name>[a-z0-9][a-z0-9-]*)"#,
    )
    .unwrap()
});

// Loose: any lowercase hyphenated token qualifies, so unrelated words can match.
static BARE_MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+(?:-[a-z0-9]+)*").unwrap());

/// Cut the snippet window around a match starting at byte offset `match_start`:
/// up to `before` characters ahead of it and `after` characters from it onwards.
pub fn snippet_window(text: &str, match_start: usize, before: usize, after: usize) -> &str {
    let start = text[..match_start]
        .char_indices()
        .rev()
        .take(before)
        .last()
        .map_or(match_start, |(idx, _)| idx);
    let end = text[match_start..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(idx, _)| match_start + idx);
    &text[start..end]
}

#[derive(Debug, Clone)]
pub struct ContextExtractor {
    vendored_dir: String,
}

impl ContextExtractor {
    pub fn new(vendored_dir: impl Into<String>) -> Self {
        Self {
            vendored_dir: vendored_dir.into(),
        }
    }

    pub fn extract(&self, snippet: &str) -> ReflectionContext {
        ReflectionContext {
            file: self.file(snippet),
            operation: operation(snippet),
            module: module(snippet),
        }
    }

    /// First-party source file named after `file://`, `at ` or `in `.
    ///
    /// Only the first candidate is considered; if it sits under the vendored
    /// directory nothing is reported.
    pub fn file(&self, snippet: &str) -> Option<String> {
        let caps = FILE_RE.captures(snippet)?;
        let path = caps.name("path").map_or("", |m| m.as_str());
        let name = caps.name("name")?.as_str();
        if !self.vendored_dir.is_empty() && format!("{path}{name}").contains(&self.vendored_dir) {
            return None;
        }
        Some(name.to_string())
    }
}

/// Call-site name: an identifier directly followed by `(`.
pub fn operation(snippet: &str) -> Option<String> {
    OPERATION_RE
        .captures(snippet)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str().to_string())
}

/// Dependency name, preferring `module`/`package`/`from '...'` forms.
pub fn module(snippet: &str) -> Option<String> {
    PREFIXED_MODULE_RE
        .captures(snippet)
        .and_then(|caps| caps.name("name"))
        .or_else(|| BARE_MODULE_RE.find(snippet))
        .map(|m| m.as_str().to_string())
}
