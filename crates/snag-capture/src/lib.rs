//! Turns an assistant transcript into at most one structured reflection.
//!
//! Stages run in order: aggregate tool output, detect the highest-priority
//! failure indicator, cut a snippet around it, extract context hints, derive a
//! signature, then append the record to the project's reflection log.

pub mod builder;
pub mod detector;
pub mod extractor;
pub mod pipeline;
pub mod signature;
pub mod transcript;

pub use builder::ReflectionBuilder;
pub use detector::{Detection, ErrorDetector};
pub use extractor::ContextExtractor;
pub use pipeline::{CaptureOutcome, CapturePipeline, HookInput, capture};
pub use transcript::{AggregatedText, aggregate_transcript};
