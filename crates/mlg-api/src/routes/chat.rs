//! Chat endpoints.

use axum::Json;
use axum::extract::State;
use mlg_nlp::ConversationContext;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::{ChatMode, ChatReply};
use crate::conversation::Turn;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omit to start a new conversation.
    pub conversation_id: Option<Uuid>,
    /// Overrides the remembered context when it carries text.
    pub context: Option<ConversationContext>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    #[serde(flatten)]
    pub reply: ChatReply,
    pub conversation_id: Uuid,
}

/// POST /api/v1/chat — full chat processing with string analysis.
pub async fn chat(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    handle(state, req, ChatMode::Full).await
}

/// POST /api/v1/chat/fast — cached translations, no analysis.
pub async fn chat_fast(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    handle(state, req, ChatMode::Fast).await
}

async fn handle(state: AppState, req: ChatRequest, mode: ChatMode) -> ApiResult<Json<ChatResponse>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }

    let conversation_id = req.conversation_id.unwrap_or_else(Uuid::now_v7);
    let context = match req.context {
        Some(context) if context.last_text().is_some() => context,
        _ => state.conversations.context(conversation_id).await,
    };

    let reply = state.chat.process(&req.message, &context, mode).await;
    tracing::info!(
        %conversation_id,
        intent = %reply.intent,
        action = %reply.action_taken,
        success = reply.success,
        "chat message handled"
    );

    state
        .conversations
        .record(
            conversation_id,
            Turn {
                message: req.message,
                subject: reply.subject.clone(),
                intent: reply.intent,
                reply: reply.message.clone(),
            },
        )
        .await;

    Ok(Json(ChatResponse {
        reply,
        conversation_id,
    }))
}
