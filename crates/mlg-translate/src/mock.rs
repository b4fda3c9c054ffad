//! Mock translator for testing — serves canned translations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{TranslateError, TranslateResult};
use crate::languages::{language_name, normalize};
use crate::types::{Detection, Translation, TranslationRequest, Translator};

/// A deterministic translator backed by an in-memory dictionary.
///
/// Unknown phrases come back as `"[code] text"`. Every `translate` and
/// `detect` call is counted so tests can assert on cache behavior.
pub struct MockTranslator {
    /// (lowercased text, target code) -> translation
    phrases: HashMap<(String, String), String>,
    /// lowercased text -> language code
    languages: HashMap<String, String>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            phrases: HashMap::new(),
            languages: HashMap::new(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a canned translation. `target` must be a supported code or name.
    pub fn add_phrase(&mut self, text: &str, target: &str, translated: impl Into<String>) {
        let code = normalize(target).unwrap_or("en");
        self.phrases
            .insert((text.to_lowercase(), code.to_string()), translated.into());
    }

    /// Declare the source language of a phrase.
    pub fn add_language(&mut self, text: &str, code: impl Into<String>) {
        self.languages.insert(text.to_lowercase(), code.into());
    }

    /// A mock that fails every call with an upstream error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// A mock preloaded with a few common phrases.
    pub fn with_sample_phrases() -> Self {
        let mut m = Self::new();
        for (text, target, translated) in [
            ("hello", "es", "hola"),
            ("hello", "fr", "bonjour"),
            ("hello", "de", "hallo"),
            ("thank you", "es", "gracias"),
            ("thank you", "fr", "merci"),
            ("good morning", "it", "buongiorno"),
            ("bonjour", "en", "hello"),
            ("hola mundo", "en", "hello world"),
        ] {
            m.add_phrase(text, target, translated);
        }
        m.add_language("bonjour", "fr");
        m.add_language("hola mundo", "es");
        m
    }

    /// Number of translate and detect calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn source_of(&self, text: &str) -> String {
        self.languages
            .get(&text.to_lowercase())
            .cloned()
            .unwrap_or_else(|| "en".to_string())
    }

    fn check_failure(&self) -> TranslateResult<()> {
        match &self.failure {
            Some(message) => Err(TranslateError::Upstream {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslateResult<Translation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let target = normalize(&request.target_language)?;
        let source = match &request.source_language {
            Some(source) => normalize(source)?.to_string(),
            None => self.source_of(&request.text),
        };
        self.check_failure()?;

        let translated = self
            .phrases
            .get(&(request.text.to_lowercase(), target.to_string()))
            .cloned()
            .unwrap_or_else(|| format!("[{target}] {}", request.text));

        Ok(Translation {
            original_text: request.text.clone(),
            translated_text: translated,
            detected_language: language_name(&source).unwrap_or("unknown").to_string(),
            source_language: source,
            target_language: target.to_string(),
        })
    }

    async fn detect(&self, text: &str) -> TranslateResult<Detection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let code = self.source_of(text);
        Ok(Detection {
            language_name: language_name(&code).unwrap_or("unknown").to_string(),
            language_code: code,
            confidence: 0.99,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
