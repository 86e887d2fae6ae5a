//! API routes.

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::chat::{get_chat_history, send_chat_message};
use crate::handlers::health::health;
use crate::handlers::insights::{
    generate_roadmap, generate_summary, get_similar_content, set_audience,
};
use crate::handlers::videos::{get_transcript, process_video, select_source, upload_source};
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        // Input source selection
        .route("/sessions/:session_id/source", post(select_source))
        .route("/sessions/:session_id/source/upload", post(upload_source))
        // Processing pipeline
        .route("/sessions/:session_id/process", post(process_video))
        // Derived artifacts
        .route("/sessions/:session_id/transcript", get(get_transcript))
        .route("/sessions/:session_id/summary", post(generate_summary))
        .route("/sessions/:session_id/roadmap", post(generate_roadmap))
        .route(
            "/sessions/:session_id/similar-content",
            get(get_similar_content),
        )
        .route("/sessions/:session_id/audience", put(set_audience))
        // Chat
        .route("/sessions/:session_id/chat", get(get_chat_history))
        .route("/sessions/:session_id/chat", post(send_chat_message));

    let rate_limiter = std::sync::Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = session_routes.layer(middleware::from_fn_with_state(
        rate_limiter,
        rate_limit_middleware,
    ));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
