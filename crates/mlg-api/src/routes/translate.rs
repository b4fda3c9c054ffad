//! Direct translation, detection and cache endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use mlg_translate::{
    CacheStats, Detection, MultiTranslation, Translation, TranslationRequest, supported_languages,
    translate_many,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub text: String,
    pub target_languages: Vec<String>,
    pub source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LanguageList {
    pub count: usize,
    pub languages: Vec<Language>,
}

fn require_text(text: &str) -> ApiResult<()> {
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }
    Ok(())
}

/// POST /api/v1/translate — translate one text.
pub async fn translate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TranslationRequest>,
) -> ApiResult<Json<Translation>> {
    require_text(&req.text)?;
    let translation = state.translator.translate(&req).await?;
    Ok(Json(translation))
}

/// POST /api/v1/translate/batch — translate one text into several languages.
pub async fn translate_batch(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BatchRequest>,
) -> ApiResult<Json<MultiTranslation>> {
    require_text(&req.text)?;
    if req.target_languages.is_empty() {
        return Err(ApiError::BadRequest(
            "target_languages must name at least one language".into(),
        ));
    }

    let result = translate_many(
        state.translator.as_ref(),
        &req.text,
        &req.target_languages,
        req.source_language.as_deref(),
    )
    .await;
    Ok(Json(result))
}

/// POST /api/v1/detect — detect the language of a text.
pub async fn detect(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DetectRequest>,
) -> ApiResult<Json<Detection>> {
    require_text(&req.text)?;
    let detection = state.translator.detect(&req.text).await?;
    Ok(Json(detection))
}

/// GET /api/v1/languages — supported languages.
pub async fn languages() -> Json<LanguageList> {
    let languages: Vec<Language> = supported_languages()
        .iter()
        .map(|&(name, code)| Language { name, code })
        .collect();
    Json(LanguageList {
        count: languages.len(),
        languages,
    })
}

/// GET /api/v1/cache/stats — translation cache statistics.
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.lock().await.stats())
}

/// DELETE /api/v1/cache — drop every cached translation.
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.lock().await.clear();
    tracing::info!("translation cache cleared");
    StatusCode::NO_CONTENT
}
