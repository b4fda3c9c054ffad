//! Chat orchestration: classify a message, run the requested action and
//! compose the reply.

use std::sync::Arc;

use mlg_nlp::{
    ChatIntent, ChatOutcome, ConversationContext, DetectionSummary, IntentClassifier, IntentKind,
    ResponseComposer, TranslationSummary, analyze,
};
use mlg_translate::{
    CacheKey, TranslateResult, Translation, TranslationCache, TranslationRequest, Translator,
    normalize, supported_languages,
};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// How much work a chat translation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Always call the translator and attach string analysis.
    Full,
    /// Serve translations from the cache when possible, skip analysis.
    Fast,
}

/// Reply to one chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub intent: IntentKind,
    pub action_taken: String,
    pub data: Option<Value>,
    pub success: bool,
    /// Text the message was about, remembered for follow-ups.
    #[serde(skip)]
    pub subject: Option<String>,
}

#[derive(Clone)]
pub struct ChatService {
    classifier: IntentClassifier,
    composer: ResponseComposer,
    translator: Arc<dyn Translator>,
    cache: Arc<Mutex<TranslationCache>>,
}

impl ChatService {
    pub fn new(translator: Arc<dyn Translator>, cache: Arc<Mutex<TranslationCache>>) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            composer: ResponseComposer::new(),
            translator,
            cache,
        }
    }

    pub async fn process(
        &self,
        message: &str,
        context: &ConversationContext,
        mode: ChatMode,
    ) -> ChatReply {
        let intent = self.classifier.classify(message);
        let kind = intent.kind();
        tracing::debug!(intent = %kind, ?mode, "classified chat message");

        let (outcome, action, data, subject) = match intent.resolve(context) {
            Err(missing) => {
                tracing::debug!(target_language = %missing.target_language, "no context to translate");
                (ChatOutcome::MissingContext, "missing_context".to_string(), None, None)
            }
            Ok(ChatIntent::Translate {
                text,
                target_language,
            }) => {
                let action = if kind == IntentKind::TranslateContext {
                    format!("translated_context_to_{target_language}")
                } else {
                    format!("translated_to_{target_language}")
                };
                let (outcome, data) = self.translate(kind, &text, &target_language, mode).await;
                (outcome, action, data, Some(text))
            }
            Ok(ChatIntent::DetectLanguage { text }) => {
                let (outcome, data) = self.detect(&text).await;
                (outcome, "detected_language".to_string(), data, Some(text))
            }
            Ok(ChatIntent::Analyze { text }) => {
                let properties = analyze(&text);
                let data = serde_json::to_value(&properties).ok();
                (
                    ChatOutcome::Analyzed {
                        text: text.clone(),
                        properties,
                    },
                    "analyzed_string".to_string(),
                    data,
                    Some(text),
                )
            }
            Ok(ChatIntent::Help) => (ChatOutcome::Help, "provided_help".to_string(), None, None),
            Ok(ChatIntent::ListLanguages) => {
                let (outcome, data) = languages();
                (outcome, "listed_languages".to_string(), Some(data), None)
            }
            Ok(ChatIntent::Greeting) => {
                (ChatOutcome::Greeting, "greeted_user".to_string(), None, None)
            }
            Ok(ChatIntent::Unknown | ChatIntent::TranslateContext { .. }) => {
                (ChatOutcome::Unknown, "unknown_intent".to_string(), None, None)
            }
        };

        let success = !matches!(
            outcome,
            ChatOutcome::MissingContext | ChatOutcome::Failed { .. }
        );

        ChatReply {
            message: self.composer.compose(&outcome),
            intent: kind,
            action_taken: action,
            data,
            success,
            subject,
        }
    }

    async fn translate(
        &self,
        kind: IntentKind,
        text: &str,
        target_label: &str,
        mode: ChatMode,
    ) -> (ChatOutcome, Option<Value>) {
        let result = match normalize(target_label) {
            Ok(target) => {
                let request = TranslationRequest::new(text, target);
                match mode {
                    ChatMode::Full => self.translator.translate(&request).await,
                    ChatMode::Fast => self.translate_cached(&request).await,
                }
            }
            Err(e) => Err(e),
        };

        let translation = match result {
            Ok(translation) => translation,
            Err(e) => {
                tracing::warn!(error = %e, language = target_label, "chat translation failed");
                return (
                    ChatOutcome::Failed {
                        intent: kind,
                        reason: e.to_string(),
                    },
                    None,
                );
            }
        };

        let analysis = (mode == ChatMode::Full).then(|| analyze(text));
        let data = json!({
            "original": translation.original_text,
            "translation": translation.translated_text,
            "source_language": translation.source_language,
            "target_language": translation.target_language,
            "analysis": analysis,
        });

        let outcome = ChatOutcome::Translated(TranslationSummary {
            original_text: translation.original_text,
            translated_text: translation.translated_text,
            detected_language: translation.detected_language,
            target_label: target_label.to_string(),
            analysis,
        });
        (outcome, Some(data))
    }

    async fn translate_cached(&self, request: &TranslationRequest) -> TranslateResult<Translation> {
        let key = CacheKey::new(
            &request.text,
            &request.target_language,
            request.source_language.as_deref(),
        );

        let cached = self.cache.lock().await.get(&key);
        if let Some(hit) = cached {
            tracing::debug!(target_language = %request.target_language, "translation cache hit");
            return Ok(hit);
        }

        let translation = self.translator.translate(request).await?;
        self.cache.lock().await.insert(key, translation.clone());
        Ok(translation)
    }

    async fn detect(&self, text: &str) -> (ChatOutcome, Option<Value>) {
        match self.translator.detect(text).await {
            Ok(detection) => {
                let data = json!({
                    "text": text,
                    "language_code": detection.language_code,
                    "language_name": detection.language_name,
                    "confidence": detection.confidence,
                });
                let outcome = ChatOutcome::LanguageDetected(DetectionSummary {
                    text: text.to_string(),
                    language_code: detection.language_code,
                    language_name: detection.language_name,
                    confidence: detection.confidence,
                });
                (outcome, Some(data))
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat language detection failed");
                (
                    ChatOutcome::Failed {
                        intent: IntentKind::DetectLanguage,
                        reason: e.to_string(),
                    },
                    None,
                )
            }
        }
    }
}

/// Supported languages sorted by name, as an outcome and a name -> code map.
fn languages() -> (ChatOutcome, Value) {
    let mut list: Vec<(String, String)> = supported_languages()
        .iter()
        .map(|(name, code)| (name.to_string(), code.to_string()))
        .collect();
    list.sort();

    let map: serde_json::Map<String, Value> = list
        .iter()
        .map(|(name, code)| (name.clone(), Value::String(code.clone())))
        .collect();
    (ChatOutcome::Languages(list), json!({ "languages": map }))
}
