//! Shared types and errors for the snag workspace.

pub mod error;
pub mod types;

pub use error::SnagError;
pub use types::{OutputFormat, SkipReason};
