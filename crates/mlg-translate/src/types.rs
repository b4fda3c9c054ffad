use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslateResult;

/// A request to translate one text into one target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    /// Language name or code; normalized by the translator.
    pub target_language: String,
    /// Language name or code; `None` means auto-detect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: None,
        }
    }

    pub fn with_source(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = Some(source_language.into());
        self
    }
}

/// A completed translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
    /// Source language code, as given or as detected upstream.
    pub source_language: String,
    /// Normalized target language code.
    pub target_language: String,
    /// Human-readable source language name ("unknown" if not in the table).
    pub detected_language: String,
}

/// Result of language detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub language_code: String,
    pub language_name: String,
    /// 0.0 - 1.0
    pub confidence: f64,
}

/// Translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `request.text` into `request.target_language`.
    async fn translate(&self, request: &TranslationRequest) -> TranslateResult<Translation>;

    /// Detect the language of `text`.
    async fn detect(&self, text: &str) -> TranslateResult<Detection>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}
