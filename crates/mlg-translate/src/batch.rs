//! Fan-out translation of one text into several languages.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{TranslationRequest, Translator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiTranslation {
    pub original_text: String,
    /// Source code from the first successful translation, else "unknown".
    pub source_language: String,
    /// Keyed by the target language as requested.
    pub translations: BTreeMap<String, String>,
}

/// Translate `text` into each of `targets`, sequentially.
///
/// A failed target does not fail the batch: its entry holds
/// `"[Translation failed: <reason>]"` instead.
pub async fn translate_many(
    translator: &dyn Translator,
    text: &str,
    targets: &[String],
    source_language: Option<&str>,
) -> MultiTranslation {
    let mut translations = BTreeMap::new();
    let mut detected: Option<String> = None;

    for target in targets {
        let mut request = TranslationRequest::new(text, target.as_str());
        if let Some(source) = source_language {
            request = request.with_source(source);
        }

        match translator.translate(&request).await {
            Ok(result) => {
                detected.get_or_insert(result.source_language);
                translations.insert(target.clone(), result.translated_text);
            }
            Err(e) => {
                tracing::warn!(language = %target, error = %e, "batch translation failed");
                translations.insert(target.clone(), format!("[Translation failed: {e}]"));
            }
        }
    }

    MultiTranslation {
        original_text: text.to_string(),
        source_language: detected.unwrap_or_else(|| "unknown".to_string()),
        translations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTranslator;

    fn targets(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn translates_every_target() {
        let mock = MockTranslator::with_sample_phrases();
        let result = translate_many(&mock, "hello", &targets(&["es", "french"]), None).await;

        assert_eq!(result.source_language, "en");
        assert_eq!(result.translations["es"], "hola");
        assert_eq!(result.translations["french"], "bonjour");
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn failures_are_inline() {
        let mock = MockTranslator::with_sample_phrases();
        let result = translate_many(&mock, "hello", &targets(&["klingon", "de"]), None).await;

        assert_eq!(
            result.translations["klingon"],
            "[Translation failed: unrecognized language: klingon]"
        );
        assert_eq!(result.translations["de"], "hallo");
        assert_eq!(result.source_language, "en");
    }

    #[tokio::test]
    async fn all_failed_reports_unknown_source() {
        let mock = MockTranslator::failing("down");
        let result = translate_many(&mock, "hello", &targets(&["es"]), None).await;
        assert_eq!(result.source_language, "unknown");
        assert!(result.translations["es"].starts_with("[Translation failed:"));
    }

    #[tokio::test]
    async fn explicit_source_is_forwarded() {
        let mock = MockTranslator::with_sample_phrases();
        let result = translate_many(&mock, "bonjour", &targets(&["en"]), Some("fr")).await;
        assert_eq!(result.source_language, "fr");
        assert_eq!(result.translations["en"], "hello");
    }
}
