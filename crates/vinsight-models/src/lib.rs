//! Shared data models for the Video Insight backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video identity and content classification
//! - Structured results extracted from model responses
//! - Chat turns and per-video chat history

pub mod chat;
pub mod results;
pub mod video;

// Re-export common types
pub use chat::{ChatRole, ChatTurn};
pub use results::{AnalysisResult, ScoreResult, TranscriptResult};
pub use video::{VideoContext, VideoId, VideoKind};
