use std::path::{Path, PathBuf};

use serde::Deserialize;
use snag_config::{CaptureConfig, SnagConfig};
use snag_core::{SkipReason, SnagError};
use snag_memory::{Reflection, ReflectionLog};
use tracing::{debug, info};

use crate::builder::ReflectionBuilder;
use crate::detector::ErrorDetector;
use crate::extractor::{ContextExtractor, snippet_window};
use crate::transcript::{aggregate_transcript, read_transcript};

/// Payload the host assistant writes to the hook's stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
    /// Only used to locate the project's reflection log.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl HookInput {
    pub fn parse(raw: &str) -> Result<Self, SnagError> {
        serde_json::from_str(raw).map_err(|err| SnagError::InvalidHookInput(err.to_string()))
    }

    pub fn project_root(&self) -> PathBuf {
        self.cwd
            .clone()
            .filter(|cwd| !cwd.as_os_str().is_empty())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Result of one capture attempt. There is no error channel: anything that
/// goes wrong becomes a `Skipped` reason.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Captured(Reflection),
    Skipped(SkipReason),
}

impl CaptureOutcome {
    pub fn reflection(&self) -> Option<&Reflection> {
        match self {
            Self::Captured(reflection) => Some(reflection),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Captured(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturePipeline {
    config: CaptureConfig,
    detector: ErrorDetector,
    extractor: ContextExtractor,
}

impl CapturePipeline {
    pub fn new(config: CaptureConfig) -> Self {
        let extractor = ContextExtractor::new(config.vendored_dir.clone());
        Self {
            config,
            detector: ErrorDetector::new(),
            extractor,
        }
    }

    /// Detect, window, extract and build a reflection from aggregated text.
    pub fn reflect_text(&self, text: &str) -> Result<Reflection, SkipReason> {
        if text.chars().count() < self.config.min_text_chars {
            return Err(SkipReason::InputUnavailable);
        }

        let detection = self.detector.detect(text).ok_or(SkipReason::NoSignal)?;
        let snippet = snippet_window(
            text,
            detection.start,
            self.config.snippet_before,
            self.config.snippet_after,
        );
        let context = self.extractor.extract(snippet);

        Ok(ReflectionBuilder::new(detection.failure_kind, snippet)
            .context(context)
            .build())
    }

    /// Same as [`Self::reflect_text`], starting from raw transcript JSONL.
    pub fn reflect_transcript(&self, content: &str) -> Result<Reflection, SkipReason> {
        let aggregated = aggregate_transcript(content);
        if aggregated.is_unparseable() {
            return Err(SkipReason::ParseFailure);
        }
        self.reflect_text(&aggregated.text)
    }

    /// Run the whole capture against a transcript file, appending any
    /// reflection to `log`. Never fails.
    pub fn run(&self, transcript_path: Option<&Path>, log: &ReflectionLog) -> CaptureOutcome {
        if !self.config.enabled {
            return skipped(SkipReason::Disabled);
        }
        let Some(transcript_path) = transcript_path else {
            return skipped(SkipReason::InputUnavailable);
        };

        let content = match read_transcript(transcript_path) {
            Ok(content) => content,
            Err(err) => {
                debug!(error = %err, "transcript unreadable");
                return skipped(SkipReason::InputUnavailable);
            }
        };

        let reflection = match self.reflect_transcript(&content) {
            Ok(reflection) => reflection,
            Err(reason) => return skipped(reason),
        };

        if let Err(err) = log.append(&reflection) {
            debug!(error = %err, path = %log.path().display(), "reflection lost");
            return skipped(SkipReason::PersistenceFailure);
        }

        info!(
            id = %reflection.id,
            failure_kind = %reflection.failure_kind,
            signature = %reflection.signature,
            "reflection captured"
        );
        CaptureOutcome::Captured(reflection)
    }
}

fn skipped(reason: SkipReason) -> CaptureOutcome {
    debug!(reason = %reason, "capture skipped");
    CaptureOutcome::Skipped(reason)
}

/// Hook entry point: resolve the project's log from `input.cwd` and capture.
pub fn capture(input: &HookInput, config: &SnagConfig) -> CaptureOutcome {
    let log = ReflectionLog::for_project(&input.project_root(), &config.log);
    CapturePipeline::new(config.capture.clone()).run(input.transcript_path.as_deref(), &log)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
