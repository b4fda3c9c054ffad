//! API route definitions and router builder.

pub mod chat;
pub mod health;
pub mod strings;
pub mod translate;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // String storage
        .route(
            "/strings",
            get(strings::list_strings).post(strings::create_string),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(strings::filter_by_natural_language),
        )
        .route(
            "/strings/{value}",
            get(strings::get_string).delete(strings::delete_string),
        )
        // Chat
        .route("/chat", post(chat::chat))
        .route("/chat/fast", post(chat::chat_fast))
        // Translation
        .route("/translate", post(translate::translate))
        .route("/translate/batch", post(translate::translate_batch))
        .route("/detect", post(translate::detect))
        .route("/languages", get(translate::languages))
        // Translation cache
        .route("/cache/stats", get(translate::cache_stats))
        .route("/cache", delete(translate::clear_cache));

    let timeout = TimeoutLayer::new(state.request_timeout);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(timeout)
        .layer(cors)
        .with_state(state)
}
