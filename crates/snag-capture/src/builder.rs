use chrono::Utc;
use snag_memory::{Reflection, ReflectionContext};
use ulid::Ulid;

use crate::signature::signature;

/// Assembles a [`Reflection`] from the pieces the capture stages produce.
#[derive(Debug, Clone)]
pub struct ReflectionBuilder {
    failure_kind: String,
    snippet: String,
    context: ReflectionContext,
}

impl ReflectionBuilder {
    pub fn new(failure_kind: impl Into<String>, snippet: &str) -> Self {
        Self {
            failure_kind: failure_kind.into(),
            snippet: snippet.trim().to_string(),
            context: ReflectionContext::default(),
        }
    }

    pub fn context(mut self, context: ReflectionContext) -> Self {
        self.context = context;
        self
    }

    /// Stamp id and timestamp and derive the signature from the raw snippet.
    pub fn build(self) -> Reflection {
        let signature = signature(&self.failure_kind, &self.snippet);
        Reflection {
            id: new_reflection_id(),
            timestamp: Some(Utc::now()),
            failure_kind: self.failure_kind,
            snippet: self.snippet,
            context: self.context,
            signature,
            analyzed: None,
        }
    }
}

/// ULID: 48-bit millisecond timestamp plus 80 random bits.
pub fn new_reflection_id() -> String {
    Ulid::new().to_string()
}
