//! Business logic services.

pub mod insight;

pub use insight::{ChatOutcome, InsightService, ProcessOutcome, TranscriptView};
