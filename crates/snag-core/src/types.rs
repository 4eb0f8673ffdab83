use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for CLI responses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Why a capture attempt produced no reflection.
///
/// Capture is best-effort: every failure on that path collapses into one of
/// these reasons instead of an error returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Capture is switched off in config.
    Disabled,
    /// Transcript missing, unreadable, or aggregated text below the minimum length.
    InputUnavailable,
    /// Hook input or the transcript as a whole could not be parsed.
    ParseFailure,
    /// No failure indicator matched.
    NoSignal,
    /// The reflection was built but could not be appended to the log.
    PersistenceFailure,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Disabled => "disabled",
            SkipReason::InputUnavailable => "input_unavailable",
            SkipReason::ParseFailure => "parse_failure",
            SkipReason::NoSignal => "no_signal",
            SkipReason::PersistenceFailure => "persistence_failure",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
