//! Rule cascade for chat intent detection.
//!
//! Rule groups are evaluated top to bottom and the first group that
//! matches decides the intent. Groups overlap textually ("help me
//! translate ..."), so the order below is the intent priority.

use std::sync::LazyLock;

use regex::Regex;

use super::{ChatIntent, IntentKind};

type Rule = fn(&str) -> Option<ChatIntent>;

/// Intent priority, highest first.
const CASCADE: &[(IntentKind, Rule)] = &[
    (IntentKind::Translate, match_translate),
    (IntentKind::TranslateContext, match_translate_context),
    (IntentKind::DetectLanguage, match_detect_language),
    (IntentKind::Analyze, match_analyze),
    (IntentKind::Help, match_help),
    (IntentKind::ListLanguages, match_list_languages),
    (IntentKind::Greeting, match_greeting),
];

/// Surface forms of a translation request, tried in order.
/// Group 1 is the text, group 2 the target language.
static TRANSLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r#"translate\s+["']?(.+?)["']?\s+to\s+(\w+)"#,
        r#"translate\s+["']?(.+?)["']?\s+into\s+(\w+)"#,
        r#"how\s+(?:do\s+)?(?:you\s+)?say\s+["']?(.+?)["']?\s+in\s+(\w+)"#,
        r#"what(?:\s+is|'s)\s+["']?(.+?)["']?\s+in\s+(\w+)"#,
        r#"^["']?(.+?)["']?\s+in\s+(\w+)$"#,
    ])
});

static TRANSLATE_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"translate\s+(?:(?:this|that|it)\s+)?(?:to|into)\s+(\w+)").unwrap()
});

static DETECT_LANGUAGE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"what\s+language\s+is\s+(.+)",
        r"detect\s+(?:the\s+)?language\s+(?:of\s+)?(.+)",
        r"identify\s+(?:the\s+language\s+of\s+)?(.+)",
        r"what\s+is\s+this\s+language[:\s]+(.+)",
    ])
});

static ANALYZE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"analyze\s+(.+)",
        r"check\s+(.+)",
        r"is\s+(.+?)\s+a\s+palindrome",
    ])
});

const HELP_KEYWORDS: &[&str] = &["help", "how", "what can", "commands", "usage", "guide"];

const LIST_LANGUAGE_PHRASES: &[&str] = &[
    "list languages",
    "show languages",
    "supported languages",
    "available languages",
];

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
];

/// Words that point back at earlier text instead of supplying new text.
const DEICTIC_SUBJECTS: &[&str] = &["this", "that", "it"];

const QUOTES: &[char] = &['"', '\''];

/// Rule-based chat intent classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a chat message. Never fails.
    pub fn classify(&self, message: &str) -> ChatIntent {
        let lower = message.to_lowercase();
        let lower = lower.trim();

        for (kind, rule) in CASCADE {
            if let Some(intent) = rule(lower) {
                tracing::debug!(intent = %kind, "chat intent matched");
                return intent;
            }
        }

        tracing::debug!("no chat intent matched");
        ChatIntent::Unknown
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

fn match_translate(text: &str) -> Option<ChatIntent> {
    TRANSLATE.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let capture = caps.get(1)?;
        let subject = clean_subject(capture.as_str());
        let target_language = caps[2].trim().to_string();
        // "translate this to french" names no text of its own; "translate
        // 'this' to french" does.
        let quoted = text[..capture.start()].ends_with(QUOTES)
            || capture.as_str().trim_start().starts_with(QUOTES);
        if subject.is_empty() || (!quoted && DEICTIC_SUBJECTS.contains(&subject)) {
            return Some(ChatIntent::TranslateContext {
                target_language,
                needs_context: true,
            });
        }
        Some(ChatIntent::Translate {
            text: subject.to_string(),
            target_language,
        })
    })
}

fn match_translate_context(text: &str) -> Option<ChatIntent> {
    let caps = TRANSLATE_CONTEXT.captures(text)?;
    Some(ChatIntent::TranslateContext {
        target_language: caps[1].to_string(),
        needs_context: true,
    })
}

fn match_detect_language(text: &str) -> Option<ChatIntent> {
    first_subject(&DETECT_LANGUAGE, text).map(|text| ChatIntent::DetectLanguage { text })
}

fn match_analyze(text: &str) -> Option<ChatIntent> {
    first_subject(&ANALYZE, text).map(|text| ChatIntent::Analyze { text })
}

fn match_help(text: &str) -> Option<ChatIntent> {
    matches_any(text, HELP_KEYWORDS).then_some(ChatIntent::Help)
}

fn match_list_languages(text: &str) -> Option<ChatIntent> {
    matches_any(text, LIST_LANGUAGE_PHRASES).then_some(ChatIntent::ListLanguages)
}

fn match_greeting(text: &str) -> Option<ChatIntent> {
    GREETINGS
        .iter()
        .any(|g| text.starts_with(g))
        .then_some(ChatIntent::Greeting)
}

/// Check if the text contains any of the given phrases.
fn matches_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

/// Subject of the first pattern that captures a non-empty one.
fn first_subject(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let subject = clean_subject(&caps[1]);
        (!subject.is_empty()).then(|| subject.to_string())
    })
}

/// Strip quoting and trailing punctuation from captured text.
///
/// When the capture opens with a quote that is closed later, only the
/// quoted segment is kept: `'hello world' please` becomes `hello world`.
fn clean_subject(raw: &str) -> &str {
    let raw = raw.trim();
    if let Some(quote) = raw.chars().next().filter(|c| QUOTES.contains(c)) {
        let inner = &raw[quote.len_utf8()..];
        if let Some(end) = inner.find(quote) {
            return inner[..end].trim();
        }
    }
    raw.trim_end_matches(['?', '!', '.'])
        .trim_matches(QUOTES)
        .trim()
}
