//! Transcript aggregation: collects tool-result text from a JSONL transcript.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use snag_core::SnagError;

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    #[serde(default, rename = "toolUseResult")]
    tool_use_result: Option<Value>,
    #[serde(default)]
    message: Option<TranscriptMessage>,
}

#[derive(Debug, Deserialize)]
struct TranscriptMessage {
    #[serde(default)]
    content: Option<Value>,
}

/// Text gathered from a transcript plus parse bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedText {
    pub text: String,
    pub parsed_entries: usize,
    pub malformed_entries: usize,
}

impl AggregatedText {
    /// Every non-blank line failed to parse.
    pub fn is_unparseable(&self) -> bool {
        self.parsed_entries == 0 && self.malformed_entries > 0
    }
}

pub fn read_transcript(path: &Path) -> Result<String, SnagError> {
    if !path.is_file() {
        return Err(SnagError::TranscriptUnavailable(path.to_path_buf()));
    }
    let bytes =
        std::fs::read(path).map_err(|_| SnagError::TranscriptUnavailable(path.to_path_buf()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Concatenate tool-result text from every transcript line, in order.
///
/// Each contributing fragment is terminated by `\n`. Lines that are not valid
/// JSON entries are counted and skipped.
pub fn aggregate_transcript(content: &str) -> AggregatedText {
    let mut aggregated = AggregatedText::default();

    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        let entry = match serde_json::from_str::<TranscriptEntry>(line) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::debug!(%error, "skipping malformed transcript line");
                aggregated.malformed_entries += 1;
                continue;
            }
        };
        aggregated.parsed_entries += 1;

        if let Some(result) = entry.tool_use_result.as_ref().and_then(fragment_text) {
            push_fragment(&mut aggregated.text, &result);
        }

        let items = entry
            .message
            .and_then(|message| message.content)
            .and_then(|content| match content {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default();
        for item in &items {
            if item.get("type").and_then(Value::as_str) != Some("tool_result") {
                continue;
            }
            if let Some(text) = item.get("content").and_then(fragment_text) {
                push_fragment(&mut aggregated.text, &text);
            }
        }
    }

    aggregated
}

fn push_fragment(buffer: &mut String, fragment: &str) {
    buffer.push_str(fragment);
    buffer.push('\n');
}

/// Flatten a tool-result payload into text. Strings pass through, content
/// block arrays contribute their `text` parts, other values are serialized.
fn fragment_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(blocks) => {
            let parts: Vec<String> = blocks
                .iter()
                .filter_map(|block| match block {
                    Value::String(text) => Some(text.clone()),
                    other => other
                        .get("text")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("\n"))
            }
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(value: Value) -> String {
        value.to_string()
    }

    #[test]
    fn test_collects_tool_use_result_and_tool_result_items_in_order() {
        let transcript = [
            line(json!({"toolUseResult": "first output"})),
            line(json!({"message": {"content": [
                {"type": "text", "text": "ignored prose"},
                {"type": "tool_result", "content": "second output"}
            ]}})),
            line(json!({"toolUseResult": "third", "message": {"content": [
                {"type": "tool_result", "content": "fourth"}
            ]}})),
        ]
        .join("\n");

        let aggregated = aggregate_transcript(&transcript);
        assert_eq!(aggregated.text, "first output\nsecond output\nthird\nfourth\n");
        assert_eq!(aggregated.parsed_entries, 3);
        assert_eq!(aggregated.malformed_entries, 0);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let transcript = format!(
            "{}\n{{not json\n\n{}\n",
            line(json!({"toolUseResult": "kept one"})),
            line(json!({"toolUseResult": "kept two"}))
        );

        let aggregated = aggregate_transcript(&transcript);
        assert_eq!(aggregated.text, "kept one\nkept two\n");
        assert_eq!(aggregated.malformed_entries, 1);
        assert!(!aggregated.is_unparseable());
    }

    #[test]
    fn test_wholly_unparseable_transcript() {
        let aggregated = aggregate_transcript("garbage\nmore garbage\n");
        assert!(aggregated.text.is_empty());
        assert!(aggregated.is_unparseable());
    }

    #[test]
    fn test_content_blocks_are_flattened() {
        let transcript = line(json!({"message": {"content": [
            {"type": "tool_result", "content": [
                {"type": "text", "text": "block a"},
                {"type": "text", "text": "block b"}
            ]}
        ]}}));

        let aggregated = aggregate_transcript(&transcript);
        assert_eq!(aggregated.text, "block a\nblock b\n");
    }

    #[test]
    fn test_structured_tool_use_result_is_serialized() {
        let transcript = line(json!({"toolUseResult": {"stderr": "Error: boom", "code": 1}}));
        let aggregated = aggregate_transcript(&transcript);
        assert!(aggregated.text.contains("Error: boom"));
    }

    #[test]
    fn test_empty_and_null_payloads_contribute_nothing() {
        let transcript = [
            line(json!({"toolUseResult": ""})),
            line(json!({"toolUseResult": null})),
            line(json!({"message": {"content": "plain user text"}})),
            line(json!({"message": {"content": [{"type": "tool_result"}]}})),
        ]
        .join("\n");

        let aggregated = aggregate_transcript(&transcript);
        assert!(aggregated.text.is_empty());
        assert_eq!(aggregated.parsed_entries, 4);
    }

    #[test]
    fn test_read_transcript_missing_file() {
        let err = read_transcript(Path::new("/nonexistent/transcript.jsonl")).unwrap_err();
        assert!(matches!(err, SnagError::TranscriptUnavailable(_)));
    }
}
