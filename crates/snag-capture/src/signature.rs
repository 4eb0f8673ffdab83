//! Signature normalization: strip volatile details so recurring failures cluster.

use std::sync::LazyLock;

use regex::Regex;

static LINE_COL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":[0-9]+:[0-9]+").unwrap());
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/[\w/-]+/").unwrap());
static HEX_ADDR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"0x[0-9a-f]+").unwrap());
static LONG_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{10,}").unwrap());
// The gap may be any whitespace, so the second word can sit on the next line.
static LEADING_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:\s+\w+)?").unwrap());

/// Replace line/column pairs, path segments, hex addresses and long numbers
/// with fixed placeholders. Applying it to its own output changes nothing.
pub fn normalize(snippet: &str) -> String {
    let text = LINE_COL_RE.replace_all(snippet, ":LINE:COL");
    let text = PATH_RE.replace_all(&text, "/PATH/");
    let text = HEX_ADDR_RE.replace_all(&text, "0xADDR");
    LONG_NUMBER_RE.replace_all(&text, "NUM").into_owned()
}

/// `failure_kind` joined by `-` to the first one-or-two-word token of the
/// normalized snippet, or `failure_kind` alone when no token exists.
pub fn signature(failure_kind: &str, snippet: &str) -> String {
    let normalized = normalize(snippet.trim());
    match LEADING_TOKEN_RE.find(&normalized) {
        Some(token) => format!("{failure_kind}-{}", token.as_str()),
        None => failure_kind.to_string(),
    }
}
