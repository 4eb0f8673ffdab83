use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum SnagError {
    #[error("Reflection log unavailable at {path}: {reason}")]
    LogUnavailable { path: PathBuf, reason: String },

    #[error("Invalid config at {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Transcript unavailable at {0}")]
    TranscriptUnavailable(PathBuf),

    #[error("Hook input is not valid JSON: {0}")]
    InvalidHookInput(String),
}
