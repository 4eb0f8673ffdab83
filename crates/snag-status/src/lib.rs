//! Read-only statistics over a project's reflection log.

pub mod aggregate;
mod reminder;
mod report;

pub use aggregate::{
    KeyCount, adjacent_co_occurrence, count_by_kind, count_by_signature, last_reflection,
    pending_count, ranked_by_frequency, top_co_occurrences, top_n, top_signatures,
};
pub use reminder::pending_reminder;
pub use report::{EMPTY_LOG_MESSAGE, LastReflection, StatusReport};
