//! Health check and service info endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use mlg_nlp::example_queries;
use mlg_translate::Translator;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health — liveness plus storage connectivity.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = state.store.backend();
    let translator = state.translator.name();
    let conversations = state.conversations.conversation_count().await;
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "storage": backend,
                "database": "connected",
                "translator": translator,
                "active_conversations": conversations,
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "storage ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "version": env!("CARGO_PKG_VERSION"),
                    "storage": backend,
                    "database": "disconnected",
                    "translator": translator,
                    "active_conversations": conversations,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// GET / — service info.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to MultiLingo Agent API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "strings": "/api/v1/strings",
            "natural_language_filter": "/api/v1/strings/filter-by-natural-language?query=...",
            "chat": "/api/v1/chat",
            "chat_fast": "/api/v1/chat/fast",
            "translate": "/api/v1/translate",
            "detect": "/api/v1/detect",
            "languages": "/api/v1/languages",
        },
        "example_queries": example_queries(),
    }))
}
