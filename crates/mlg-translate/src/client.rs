//! HTTP client for the public Google translate endpoint.
//!
//! Uses the keyless `translate_a/single?client=gtx` API. The response is a
//! positional JSON array: `[0]` holds the translated sentence segments,
//! `[2]` the detected source code and `[6]` (when present) the detection
//! confidence.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{TranslateError, TranslateResult};
use crate::languages::{language_name, normalize};
use crate::types::{Detection, Translation, TranslationRequest, Translator};

/// Configuration for the HTTP translator.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    /// Translate API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Retries after the first attempt on throttling or 5xx.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff between attempts, doubled on each retry.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_base_url() -> String {
    "https://translate.googleapis.com".into()
}
fn default_timeout_secs() -> u64 {
    8
}
fn default_connect_timeout_secs() -> u64 {
    5
}
fn default_max_retries() -> u32 {
    2
}
fn default_backoff_ms() -> u64 {
    500
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Statuses worth another attempt.
fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

/// Client for the upstream translate endpoint.
pub struct HttpTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl HttpTranslator {
    pub fn new(config: TranslatorConfig) -> TranslateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.backoff_ms.saturating_mul(1 << attempt.min(16)))
    }

    async fn fetch(&self, source: &str, target: &str, text: &str) -> TranslateResult<Value> {
        let url = format!(
            "{}/translate_a/single",
            self.config.base_url.trim_end_matches('/')
        );
        let params = [
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ];

        let mut attempt = 0;
        loop {
            match self.client.get(&url).query(&params).send().await {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .json()
                        .await
                        .map_err(|e| TranslateError::InvalidResponse(e.to_string()));
                }
                Ok(resp) => {
                    let status = resp.status();
                    if !is_retryable(status) || attempt >= self.config.max_retries {
                        return Err(TranslateError::Upstream {
                            status: status.as_u16(),
                            message: status
                                .canonical_reason()
                                .unwrap_or("unexpected status")
                                .to_string(),
                        });
                    }
                    tracing::warn!(%status, attempt, "translate service returned retryable status");
                }
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt < self.config.max_retries => {
                    tracing::warn!(error = %e, attempt, "translate request failed, retrying");
                }
                Err(e) => return Err(e.into()),
            }

            tokio::time::sleep(self.backoff(attempt)).await;
            attempt += 1;
        }
    }
}

/// Parsed fields of the positional gtx response.
#[derive(Debug, PartialEq)]
struct GtxResult {
    translated: String,
    detected: Option<String>,
    confidence: f64,
}

fn parse_gtx(body: &Value) -> TranslateResult<GtxResult> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::InvalidResponse("missing sentence segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    let detected = body
        .get(2)
        .and_then(Value::as_str)
        .map(str::to_lowercase);
    let confidence = body.get(6).and_then(Value::as_f64).unwrap_or(1.0);

    Ok(GtxResult {
        translated,
        detected,
        confidence,
    })
}

fn display_name(code: &str) -> String {
    match language_name(code) {
        Some(name) => name.to_string(),
        None if code == "auto" => "auto-detected".to_string(),
        None => "unknown".to_string(),
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslateResult<Translation> {
        let target = normalize(&request.target_language)?;
        let source = match &request.source_language {
            Some(source) => normalize(source)?,
            None => "auto",
        };

        tracing::debug!(source, target_language = target, "translating");
        let body = self.fetch(source, target, &request.text).await?;
        let parsed = parse_gtx(&body)?;

        let source_language = if source == "auto" {
            parsed.detected.unwrap_or_else(|| "auto".to_string())
        } else {
            source.to_string()
        };

        tracing::info!(
            source = %source_language,
            target_language = target,
            chars = request.text.chars().count(),
            "translation complete"
        );

        Ok(Translation {
            original_text: request.text.clone(),
            translated_text: parsed.translated,
            detected_language: display_name(&source_language),
            source_language,
            target_language: target.to_string(),
        })
    }

    async fn detect(&self, text: &str) -> TranslateResult<Detection> {
        let body = self.fetch("auto", "en", text).await?;
        let parsed = parse_gtx(&body)?;
        let code = parsed
            .detected
            .ok_or_else(|| TranslateError::InvalidResponse("no detected language".into()))?;

        tracing::info!(language = %code, confidence = parsed.confidence, "language detected");

        Ok(Detection {
            language_name: display_name(&code),
            language_code: code,
            confidence: parsed.confidence,
        })
    }

    fn name(&self) -> &'static str {
        "google-gtx"
    }
}
