//! Supported language table and name/code normalization.

use crate::error::{TranslateError, TranslateResult};

/// (name, code) in lookup order. Prefix matching walks this order, so an
/// ambiguous prefix resolves to the earlier entry.
const LANGUAGES: &[(&str, &str)] = &[
    ("english", "en"),
    ("spanish", "es"),
    ("french", "fr"),
    ("german", "de"),
    ("italian", "it"),
    ("portuguese", "pt"),
    ("russian", "ru"),
    ("japanese", "ja"),
    ("chinese", "zh-cn"),
    ("korean", "ko"),
    ("arabic", "ar"),
    ("hindi", "hi"),
    ("dutch", "nl"),
    ("turkish", "tr"),
    ("swedish", "sv"),
    ("polish", "pl"),
    ("vietnamese", "vi"),
    ("thai", "th"),
    ("greek", "el"),
    ("czech", "cs"),
    ("danish", "da"),
    ("finnish", "fi"),
    ("norwegian", "no"),
    ("romanian", "ro"),
    ("ukrainian", "uk"),
];

/// Resolve a language name, code, or name prefix to its code.
///
/// Order: known code, exact name, then the first entry whose name starts
/// with the input or whose first three letters start the input.
pub fn normalize(input: &str) -> TranslateResult<&'static str> {
    let lang = input.trim().to_lowercase();
    if lang.is_empty() {
        return Err(TranslateError::UnsupportedLanguage(input.to_string()));
    }

    if let Some((_, code)) = LANGUAGES.iter().find(|(_, code)| *code == lang) {
        return Ok(*code);
    }
    if let Some((_, code)) = LANGUAGES.iter().find(|(name, _)| *name == lang) {
        return Ok(*code);
    }

    LANGUAGES
        .iter()
        .find(|(name, _)| name.starts_with(&lang) || lang.starts_with(&name[..3]))
        .map(|(_, code)| *code)
        .ok_or_else(|| TranslateError::UnsupportedLanguage(input.to_string()))
}

/// Language name for a code, if it is in the table.
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    LANGUAGES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

/// All supported (name, code) pairs in table order.
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    LANGUAGES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_pass_through() {
        assert_eq!(normalize("es").unwrap(), "es");
        assert_eq!(normalize("ZH-CN").unwrap(), "zh-cn");
        assert_eq!(normalize("no").unwrap(), "no");
    }

    #[test]
    fn names_map_to_codes() {
        assert_eq!(normalize("spanish").unwrap(), "es");
        assert_eq!(normalize("  French ").unwrap(), "fr");
        assert_eq!(normalize("chinese").unwrap(), "zh-cn");
    }

    #[test]
    fn prefixes() {
        assert_eq!(normalize("span").unwrap(), "es");
        assert_eq!(normalize("germ").unwrap(), "de");
        // first three letters of the name prefix the input
        assert_eq!(normalize("spanisch").unwrap(), "es");
        assert_eq!(normalize("portugues").unwrap(), "pt");
    }

    #[test]
    fn ambiguous_prefix_takes_first_entry() {
        // "f" prefixes both french and finnish
        assert_eq!(normalize("f").unwrap(), "fr");
    }

    #[test]
    fn unknown_languages() {
        assert!(matches!(
            normalize("klingon"),
            Err(TranslateError::UnsupportedLanguage(l)) if l == "klingon"
        ));
        assert!(normalize("").is_err());
        assert!(normalize("   ").is_err());
    }

    #[test]
    fn names_for_codes() {
        assert_eq!(language_name("en"), Some("english"));
        assert_eq!(language_name("UK"), Some("ukrainian"));
        assert_eq!(language_name("xx"), None);
    }

    #[test]
    fn table_size() {
        assert_eq!(supported_languages().len(), 25);
        assert_eq!(supported_languages()[0], ("english", "en"));
    }
}
