//! Chat intents and the rule-based classifier that detects them.
//!
//! A message is classified into exactly one [`ChatIntent`], which carries
//! whatever the handler needs (text to translate, target language, ...).
//! Classification never fails; unmatched input is [`ChatIntent::Unknown`].

mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MissingContext;

pub use rules::IntentClassifier;

/// The classified purpose of a chat message, with its extracted payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ChatIntent {
    /// Translate explicit text, e.g. "translate 'hello' to spanish".
    Translate {
        text: String,
        target_language: String,
    },
    /// Translate whatever the user sent previously ("translate this to french").
    TranslateContext {
        target_language: String,
        needs_context: bool,
    },
    DetectLanguage {
        text: String,
    },
    Analyze {
        text: String,
    },
    Help,
    ListLanguages,
    Greeting,
    Unknown,
}

/// Payload-free intent label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Translate,
    TranslateContext,
    DetectLanguage,
    Analyze,
    Help,
    ListLanguages,
    Greeting,
    Unknown,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Translate => "translate",
            IntentKind::TranslateContext => "translate_context",
            IntentKind::DetectLanguage => "detect_language",
            IntentKind::Analyze => "analyze",
            IntentKind::Help => "help",
            IntentKind::ListLanguages => "list_languages",
            IntentKind::Greeting => "greeting",
            IntentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ChatIntent {
    pub fn kind(&self) -> IntentKind {
        match self {
            ChatIntent::Translate { .. } => IntentKind::Translate,
            ChatIntent::TranslateContext { .. } => IntentKind::TranslateContext,
            ChatIntent::DetectLanguage { .. } => IntentKind::DetectLanguage,
            ChatIntent::Analyze { .. } => IntentKind::Analyze,
            ChatIntent::Help => IntentKind::Help,
            ChatIntent::ListLanguages => IntentKind::ListLanguages,
            ChatIntent::Greeting => IntentKind::Greeting,
            ChatIntent::Unknown => IntentKind::Unknown,
        }
    }

    /// The user-supplied subject text, if this intent carries one.
    pub fn subject(&self) -> Option<&str> {
        match self {
            ChatIntent::Translate { text, .. }
            | ChatIntent::DetectLanguage { text }
            | ChatIntent::Analyze { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Replace a context-dependent translation with an explicit one.
    ///
    /// Every other intent is returned unchanged.
    pub fn resolve(self, context: &ConversationContext) -> Result<ChatIntent, MissingContext> {
        match self {
            ChatIntent::TranslateContext {
                target_language, ..
            } => match context.last_text() {
                Some(text) => Ok(ChatIntent::Translate {
                    text: text.to_string(),
                    target_language,
                }),
                None => Err(MissingContext { target_language }),
            },
            other => Ok(other),
        }
    }
}

/// State carried over from earlier turns of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_text: Option<String>,
}

impl ConversationContext {
    pub fn new(last_text: impl Into<String>) -> Self {
        Self {
            last_text: Some(last_text.into()),
        }
    }

    /// The previous text, treating blank text as absent.
    pub fn last_text(&self) -> Option<&str> {
        self.last_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
