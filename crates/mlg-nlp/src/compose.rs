//! Renders chat outcomes as plain-text replies.

use crate::analysis::StringProperties;
use crate::intent::IntentKind;

/// How many languages the language list shows before summarizing.
const LANGUAGE_PREVIEW: usize = 10;

/// A finished translation, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationSummary {
    pub original_text: String,
    pub translated_text: String,
    /// Human-readable source language (e.g. "english").
    pub detected_language: String,
    /// Target language as the user wrote it.
    pub target_label: String,
    pub analysis: Option<StringProperties>,
}

/// A language detection result.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSummary {
    pub text: String,
    pub language_code: String,
    pub language_name: String,
    /// 0.0 - 1.0
    pub confidence: f64,
}

/// Structured outcome of handling one chat intent.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Translated(TranslationSummary),
    LanguageDetected(DetectionSummary),
    Analyzed {
        text: String,
        properties: StringProperties,
    },
    Help,
    /// (name, code) pairs sorted by name.
    Languages(Vec<(String, String)>),
    Greeting,
    Unknown,
    MissingContext,
    Failed {
        intent: IntentKind,
        reason: String,
    },
}

/// Maps outcomes to reply templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, outcome: &ChatOutcome) -> String {
        match outcome {
            ChatOutcome::Translated(summary) => translated(summary),
            ChatOutcome::LanguageDetected(summary) => detected(summary),
            ChatOutcome::Analyzed { text, properties } => analyzed(text, properties),
            ChatOutcome::Help => HELP.trim().to_string(),
            ChatOutcome::Languages(languages) => language_list(languages),
            ChatOutcome::Greeting => GREETING.trim().to_string(),
            ChatOutcome::Unknown => UNKNOWN.trim().to_string(),
            ChatOutcome::MissingContext => {
                "I need some text to translate! Try: 'Translate [your text] to [language]'".into()
            }
            ChatOutcome::Failed { intent, reason } => failed(*intent, reason),
        }
    }
}

fn translated(summary: &TranslationSummary) -> String {
    let mut lines = vec![
        "Translation Complete!".to_string(),
        String::new(),
        format!(
            "Original ({}): {}",
            summary.detected_language, summary.original_text
        ),
        format!(
            "{}: {}",
            title_case(&summary.target_label),
            summary.translated_text
        ),
    ];

    if let Some(analysis) = &summary.analysis {
        lines.push(String::new());
        lines.push("Analysis:".into());
        lines.push(format!("Length: {} characters", analysis.length));
        lines.push(format!("Words: {}", analysis.word_count));
        if analysis.is_palindrome {
            lines.push("Palindrome: Yes".into());
        }
    }

    lines.join("\n")
}

fn detected(summary: &DetectionSummary) -> String {
    format!(
        "Language Detected!\n\nText: {}\nLanguage: {} ({})\nConfidence: {:.0}%",
        summary.text,
        title_case(&summary.language_name),
        summary.language_code,
        summary.confidence * 100.0
    )
}

fn analyzed(text: &str, properties: &StringProperties) -> String {
    let mut message = format!(
        "String Analysis\n\nText: {text}\n\nProperties:\nLength: {} characters\nWords: {}\nUnique characters: {}\nPalindrome: {}",
        properties.length,
        properties.word_count,
        properties.unique_characters,
        if properties.is_palindrome { "Yes" } else { "No" },
    );
    if let Some(ch) = properties.most_common_character() {
        message.push_str(&format!("\nMost common character: {ch}"));
    }
    message
}

fn language_list(languages: &[(String, String)]) -> String {
    let mut message = format!("Supported Languages ({} languages)\n\n", languages.len());
    let preview: Vec<String> = languages
        .iter()
        .take(LANGUAGE_PREVIEW)
        .map(|(name, code)| format!("- {} ({code})", title_case(name)))
        .collect();
    message.push_str(&preview.join("\n"));
    if languages.len() > LANGUAGE_PREVIEW {
        message.push_str(&format!(
            "\n\n...and {} more!",
            languages.len() - LANGUAGE_PREVIEW
        ));
    }
    message.push_str("\n\nYou can use either the language name or code!");
    message
}

fn failed(intent: IntentKind, reason: &str) -> String {
    match intent {
        IntentKind::Translate | IntentKind::TranslateContext => {
            format!("Translation failed: {reason}")
        }
        IntentKind::DetectLanguage => format!("Could not detect language: {reason}"),
        IntentKind::Analyze => format!("Analysis failed: {reason}"),
        other => format!("Could not handle '{other}' request: {reason}"),
    }
}

/// "new york" -> "New York"
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const HELP: &str = r#"
MultiLingo Agent - Help Guide

I can help you with:

Translation:
- "Translate 'hello' to Spanish"
- "How do you say 'thank you' in French?"
- "What is 'bonjour' in English?"

Language Detection:
- "What language is 'hola mundo'?"
- "Detect language of 'bonjour'"

String Analysis:
- "Analyze 'hello world'"
- "Is 'racecar' a palindrome?"

Other Commands:
- "List languages" - See all supported languages
- "Help" - Show this message

Just ask naturally! I'll understand.
"#;

const GREETING: &str = r#"
Hello! I'm MultiLingo Agent!

I'm here to help you with:
- Translations (25+ languages)
- Language detection
- String analysis

Try asking me:
- "Translate 'hello' to Spanish"
- "What language is 'bonjour'?"
- "Analyze 'racecar'"

Type "help" to see all commands!
"#;

const UNKNOWN: &str = r#"
I'm not sure what you want me to do.

Here are some things I can help with:

Translation:
"Translate 'hello' to Spanish"

Language Detection:
"What language is 'bonjour'?"

String Analysis:
"Analyze 'hello world'"

Type "help" for more examples!
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    fn compose(outcome: ChatOutcome) -> String {
        ResponseComposer::new().compose(&outcome)
    }

    #[test]
    fn translation_with_analysis() {
        let message = compose(ChatOutcome::Translated(TranslationSummary {
            original_text: "level".into(),
            translated_text: "nivel".into(),
            detected_language: "english".into(),
            target_label: "spanish".into(),
            analysis: Some(analyze("level")),
        }));
        assert!(message.starts_with("Translation Complete!"));
        assert!(message.contains("Original (english): level"));
        assert!(message.contains("Spanish: nivel"));
        assert!(message.contains("Length: 5 characters"));
        assert!(message.contains("Words: 1"));
        assert!(message.contains("Palindrome: Yes"));
    }

    #[test]
    fn translation_without_analysis() {
        let message = compose(ChatOutcome::Translated(TranslationSummary {
            original_text: "hello".into(),
            translated_text: "bonjour".into(),
            detected_language: "english".into(),
            target_label: "fr".into(),
            analysis: None,
        }));
        assert!(message.contains("Fr: bonjour"));
        assert!(!message.contains("Analysis:"));
    }

    #[test]
    fn detection_shows_percentage() {
        let message = compose(ChatOutcome::LanguageDetected(DetectionSummary {
            text: "hola mundo".into(),
            language_code: "es".into(),
            language_name: "spanish".into(),
            confidence: 0.87,
        }));
        assert!(message.contains("Language: Spanish (es)"));
        assert!(message.contains("Confidence: 87%"));
    }

    #[test]
    fn analysis_lists_properties() {
        let message = compose(ChatOutcome::Analyzed {
            text: "hello world".into(),
            properties: analyze("hello world"),
        });
        assert!(message.contains("Text: hello world"));
        assert!(message.contains("Length: 11 characters"));
        assert!(message.contains("Unique characters: 8"));
        assert!(message.contains("Palindrome: No"));
        assert!(message.contains("Most common character: l"));
    }

    #[test]
    fn language_list_preview() {
        let languages: Vec<(String, String)> = (0..12)
            .map(|i| (format!("lang{i:02}"), format!("l{i}")))
            .collect();
        let message = compose(ChatOutcome::Languages(languages));
        assert!(message.contains("(12 languages)"));
        assert!(message.contains("- Lang00 (l0)"));
        assert!(message.contains("- Lang09 (l9)"));
        assert!(!message.contains("Lang10"));
        assert!(message.contains("...and 2 more!"));
    }

    #[test]
    fn missing_context_prompts_for_text() {
        let message = compose(ChatOutcome::MissingContext);
        assert!(message.starts_with("I need some text to translate!"));
    }

    #[test]
    fn failures_name_the_action() {
        let message = compose(ChatOutcome::Failed {
            intent: IntentKind::Translate,
            reason: "unsupported language: klingon".into(),
        });
        assert_eq!(message, "Translation failed: unsupported language: klingon");

        let message = compose(ChatOutcome::Failed {
            intent: IntentKind::DetectLanguage,
            reason: "upstream unavailable".into(),
        });
        assert!(message.starts_with("Could not detect language"));
    }

    #[test]
    fn fixed_templates() {
        assert!(compose(ChatOutcome::Help).starts_with("MultiLingo Agent - Help Guide"));
        assert!(compose(ChatOutcome::Greeting).starts_with("Hello!"));
        assert!(compose(ChatOutcome::Unknown).contains("Type \"help\""));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("spanish"), "Spanish");
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case(""), "");
    }
}
