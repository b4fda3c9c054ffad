//! Natural-language filter query parser.
//!
//! An ordered list of independent detectors runs over the lower-cased
//! query. Each one may add or overwrite predicate fields; their effects
//! accumulate. A query that triggers nothing is rejected.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::FilterPredicate;
use crate::error::{QueryError, QueryResult};

type Detector = fn(&str, &mut FilterPredicate) -> QueryResult<()>;

/// Detectors in evaluation order. All of them run.
const DETECTORS: &[(&str, Detector)] = &[
    ("palindrome", detect_palindrome),
    ("word_count", detect_word_count),
    ("length", detect_length),
    ("character", detect_character),
];

static PALINDROME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpalindrom(?:e|ic|es)\b").unwrap());

// Also matched by PALINDROME, so it must be applied afterwards.
static NON_PALINDROME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:not|non)[-\s]palindrom(?:e|ic|es)\b").unwrap());

/// Word-count phrases, first match wins. `None` means "read the numeral".
static WORD_COUNT: LazyLock<Vec<(Regex, Option<usize>)>> = LazyLock::new(|| {
    [
        (r"\bsingle\s+word\b", Some(1)),
        (r"\bone\s+word\b", Some(1)),
        (r"\b(\d+)\s+words?\b", None),
        (r"\btwo\s+words?\b", Some(2)),
        (r"\bthree\s+words?\b", Some(3)),
        (r"\bfour\s+words?\b", Some(4)),
        (r"\bfive\s+words?\b", Some(5)),
    ]
    .into_iter()
    .map(|(pattern, count)| (Regex::new(pattern).unwrap(), count))
    .collect()
});

#[derive(Debug, Clone, Copy)]
enum LengthPhrase {
    LongerThan,
    ShorterThan,
    AtLeast,
    AtMost,
    Between,
    Exactly,
    Empty,
}

/// Length phrases. Every match is applied in order; later ones overwrite.
static LENGTH: LazyLock<Vec<(Regex, LengthPhrase)>> = LazyLock::new(|| {
    [
        (r"\blonger\s+than\s+(\d+)", LengthPhrase::LongerThan),
        (r"\bshorter\s+than\s+(\d+)", LengthPhrase::ShorterThan),
        (r"\bat\s+least\s+(\d+)\s+characters?", LengthPhrase::AtLeast),
        (r"\bat\s+most\s+(\d+)\s+characters?", LengthPhrase::AtMost),
        (
            r"\bbetween\s+(\d+)\s+and\s+(\d+)\s+characters?",
            LengthPhrase::Between,
        ),
        (r"\bexactly\s+(\d+)\s+characters?", LengthPhrase::Exactly),
        (r"\bempty\s+strings?\b", LengthPhrase::Empty),
    ]
    .into_iter()
    .map(|(pattern, phrase)| (Regex::new(pattern).unwrap(), phrase))
    .collect()
});

/// Character phrases capturing the letter directly, first match wins.
static CHARACTER: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bcontain(?:ing|s)?\s+(?:the\s+)?letter\s+([a-z])\b",
        r"\b(?:containing|with)\s+(?:the\s+)?characters?\s+([a-z])\b",
        r"\bstrings?\s+with\s+([a-z])\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static ORDINAL_VOWEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:first|second|third|fourth|fifth)\s+vowel\b").unwrap());

const VOWELS: [(&str, char); 5] = [
    ("first", 'a'),
    ("second", 'e'),
    ("third", 'i'),
    ("fourth", 'o'),
    ("fifth", 'u'),
];

/// Parse a natural-language query into a filter predicate.
///
/// Fails with [`QueryError::Unrecognized`] when no detector fires and
/// with [`QueryError::OutOfRange`] when a numeral cannot be represented
/// as a bound. Bound consistency is not checked here; see
/// [`FilterPredicate::validate`].
pub fn parse_query(query: &str) -> QueryResult<FilterPredicate> {
    let lower = query.to_lowercase();
    let mut predicate = FilterPredicate::default();

    for (name, detect) in DETECTORS {
        detect(&lower, &mut predicate)?;
        tracing::trace!(detector = name, ?predicate, "detector applied");
    }

    if predicate.is_empty() {
        tracing::debug!(query, "no filter detector matched");
        return Err(QueryError::unrecognized());
    }

    tracing::debug!(query, ?predicate, "parsed filter query");
    Ok(predicate)
}

/// Example queries the parser understands.
pub fn example_queries() -> &'static [&'static str] {
    &[
        "all single word palindromic strings",
        "palindromes with one word",
        "strings longer than 10 characters",
        "strings shorter than 5 characters",
        "strings between 5 and 10 characters",
        "strings containing the letter z",
        "strings with the character a",
        "palindromic strings containing the first vowel",
        "two word strings",
        "strings with exactly 7 characters",
        "not palindromic strings",
        "strings at least 20 characters long",
        "empty strings",
    ]
}

fn detect_palindrome(query: &str, predicate: &mut FilterPredicate) -> QueryResult<()> {
    if PALINDROME.is_match(query) {
        predicate.is_palindrome = Some(true);
    }
    if NON_PALINDROME.is_match(query) {
        predicate.is_palindrome = Some(false);
    }
    Ok(())
}

fn detect_word_count(query: &str, predicate: &mut FilterPredicate) -> QueryResult<()> {
    for (re, count) in WORD_COUNT.iter() {
        let Some(caps) = re.captures(query) else {
            continue;
        };
        predicate.word_count = Some(match count {
            Some(n) => *n,
            None => number(&caps, 1)?,
        });
        break;
    }
    Ok(())
}

fn detect_length(query: &str, predicate: &mut FilterPredicate) -> QueryResult<()> {
    for (re, phrase) in LENGTH.iter() {
        let Some(caps) = re.captures(query) else {
            continue;
        };
        match phrase {
            LengthPhrase::LongerThan => {
                let n = number(&caps, 1)?;
                predicate.min_length = Some(n.checked_add(1).ok_or_else(|| out_of_range(&caps))?);
            }
            LengthPhrase::ShorterThan => {
                let n = number(&caps, 1)?;
                predicate.max_length = Some(n.checked_sub(1).ok_or_else(|| out_of_range(&caps))?);
            }
            LengthPhrase::AtLeast => predicate.min_length = Some(number(&caps, 1)?),
            LengthPhrase::AtMost => predicate.max_length = Some(number(&caps, 1)?),
            LengthPhrase::Between => {
                predicate.min_length = Some(number(&caps, 1)?);
                predicate.max_length = Some(number(&caps, 2)?);
            }
            LengthPhrase::Exactly => {
                let n = number(&caps, 1)?;
                predicate.min_length = Some(n);
                predicate.max_length = Some(n);
            }
            LengthPhrase::Empty => {
                predicate.min_length = Some(0);
                predicate.max_length = Some(0);
            }
        }
    }
    Ok(())
}

fn detect_character(query: &str, predicate: &mut FilterPredicate) -> QueryResult<()> {
    let letter = CHARACTER
        .iter()
        .find_map(|re| re.captures(query))
        .and_then(|caps| caps[1].chars().next());

    let found = letter.or_else(|| {
        // Ordinals are checked against the whole query in table order, so
        // an earlier ordinal anywhere in the query wins over the one in the
        // vowel phrase.
        if !ORDINAL_VOWEL.is_match(query) {
            return None;
        }
        VOWELS
            .iter()
            .find(|(ordinal, _)| query.contains(ordinal))
            .map(|(_, vowel)| *vowel)
    });

    if found.is_some() {
        predicate.contains_character = found;
    }
    Ok(())
}

fn number(caps: &Captures<'_>, group: usize) -> QueryResult<usize> {
    caps[group].parse().map_err(|_| out_of_range(caps))
}

fn out_of_range(caps: &Captures<'_>) -> QueryError {
    QueryError::OutOfRange {
        phrase: caps[0].to_string(),
    }
}
