//! Request handlers.

pub mod chat;
pub mod health;
pub mod insights;
pub mod videos;

pub use chat::*;
pub use health::*;
pub use insights::*;
pub use videos::*;
