//! Gemini integration for the Video Insight backend.
//!
//! This crate provides:
//! - Files API lifecycle (upload, status refresh, delete)
//! - A bounded-retry readiness gate for uploaded files
//! - generateContent with persona system instructions
//! - Best-effort normalization of structured model responses

pub mod client;
pub mod error;
pub mod normalize;
pub mod prompts;
pub mod readiness;
pub mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{GeminiError, GeminiResult};
pub use normalize::{extract_object, parse_structured};
pub use prompts::Persona;
pub use readiness::ReadinessGate;
pub use types::{FileState, GenerationPart, RemoteFile};
