use thiserror::Error;

/// Errors from translation and language detection.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("unrecognized language: {0}")]
    UnsupportedLanguage(String),

    #[error("translation service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid translation response: {0}")]
    InvalidResponse(String),
}

impl TranslateError {
    /// Whether the caller supplied something we cannot serve, as opposed to
    /// the upstream service misbehaving.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedLanguage(_))
    }
}

pub type TranslateResult<T> = Result<T, TranslateError>;
