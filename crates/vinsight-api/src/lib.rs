//! Axum HTTP API server for the Video Insight backend.
//!
//! This crate provides:
//! - Session-scoped REST surface over the processing workflow
//! - In-memory session store with explicit reset rules
//! - Rate limiting, CORS, request-id and request-logging middleware

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod sessions;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::InsightService;
pub use sessions::{Session, SessionStore};
pub use state::AppState;
