use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One detected failure, as stored on a single line of the reflection log.
///
/// Older logs used `ts` / `error_type` and may lack any field; readers accept
/// both spellings and default whatever is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    #[serde(default)]
    pub id: String,
    #[serde(
        default,
        alias = "ts",
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, alias = "error_type")]
    pub failure_kind: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub context: ReflectionContext,
    #[serde(default)]
    pub signature: String,
    /// Set by an external review workflow; never written by capture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed: Option<bool>,
}

impl Reflection {
    pub fn is_pending(&self) -> bool {
        !self.analyzed.unwrap_or(false)
    }
}

/// Heuristic location hints pulled from the snippet. Each key is present only
/// when its extractor matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ReflectionContext {
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.operation.is_none() && self.module.is_none()
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|parsed| parsed.with_timezone(&Utc)))
}
