use std::fmt::Write as _;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use snag_config::StatusConfig;
use snag_memory::Reflection;

use crate::aggregate::{
    KeyCount, last_reflection, pending_count, top_co_occurrences, top_n, top_signatures,
};
use crate::reminder::pending_reminder;

pub const EMPTY_LOG_MESSAGE: &str = "No reflections recorded yet.";

/// Snapshot of the reflection log for the `status` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub total: usize,
    pub top_kinds: Vec<KeyCount>,
    pub top_pairs: Vec<KeyCount>,
    pub top_signatures: Vec<KeyCount>,
    pub last: Option<LastReflection>,
    pub pending: usize,
    pub reminder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastReflection {
    pub failure_kind: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub signature: String,
}

impl StatusReport {
    pub fn from_reflections(reflections: &[Reflection], config: &StatusConfig) -> Self {
        let pending = pending_count(reflections);
        Self {
            total: reflections.len(),
            top_kinds: top_n(reflections, config.top_kinds),
            top_pairs: top_co_occurrences(reflections, config.top_pairs),
            top_signatures: top_signatures(reflections, config.top_signatures),
            last: last_reflection(reflections).map(|r| LastReflection {
                failure_kind: r.failure_kind.clone(),
                timestamp: r.timestamp,
                signature: r.signature.clone(),
            }),
            pending,
            reminder: pending_reminder(pending, config.pending_reminder_threshold),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return format!("{EMPTY_LOG_MESSAGE}\n");
        }

        let mut out = String::new();
        let _ = writeln!(out, "Reflections: {} ({} pending)", self.total, self.pending);

        write_section(&mut out, "Top failure kinds", &self.top_kinds);
        write_section(&mut out, "Recurring sequences", &self.top_pairs);
        write_section(&mut out, "Top signatures", &self.top_signatures);

        if let Some(last) = &self.last {
            let when = last
                .timestamp
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "unknown time".to_string());
            let _ = writeln!(out, "\nLast: {} at {}", last.failure_kind, when);
        }
        if let Some(reminder) = &self.reminder {
            let _ = writeln!(out, "\n{reminder}");
        }
        out
    }
}

fn write_section(out: &mut String, title: &str, rows: &[KeyCount]) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for (idx, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} ({})", idx + 1, row.key, row.count);
    }
}
