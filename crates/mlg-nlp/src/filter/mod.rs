//! Filter predicates over stored strings and the natural-language query
//! parser that builds them.

mod parser;

use serde::{Deserialize, Serialize};

use crate::analysis::StringProperties;
use crate::error::{QueryError, QueryResult};

pub use parser::{example_queries, parse_query};

/// A set of optional conditions combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterPredicate {
    /// True when no condition is set (matches everything).
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject bounds where min_length exceeds max_length.
    pub fn validate(&self) -> QueryResult<()> {
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(QueryError::ConflictingBounds { min, max }),
            _ => Ok(()),
        }
    }

    /// Whether a stored string satisfies every present condition.
    pub fn matches(&self, value: &str, properties: &StringProperties) -> bool {
        if let Some(flag) = self.is_palindrome
            && properties.is_palindrome != flag
        {
            return false;
        }
        if let Some(min) = self.min_length
            && properties.length < min
        {
            return false;
        }
        if let Some(max) = self.max_length
            && properties.length > max
        {
            return false;
        }
        if let Some(count) = self.word_count
            && properties.word_count != count
        {
            return false;
        }
        if let Some(ch) = self.contains_character
            && !value.contains(ch)
        {
            return false;
        }
        true
    }

    /// Canonical English phrasing of this predicate.
    ///
    /// Feeding the result back through [`parse_query`] yields the same
    /// predicate, provided `contains_character` (if any) is a lowercase
    /// ASCII letter.
    pub fn to_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        match self.word_count {
            Some(1) => parts.push("single word".into()),
            Some(n) => parts.push(format!("{n} words")),
            None => {}
        }
        match self.is_palindrome {
            Some(true) => parts.push("palindromic".into()),
            Some(false) => parts.push("non-palindromic".into()),
            None => {}
        }
        parts.push("strings".into());

        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min == max => parts.push(format!("exactly {min} characters")),
            (Some(min), Some(max)) => parts.push(format!("between {min} and {max} characters")),
            (Some(min), None) => parts.push(format!("at least {min} characters")),
            (None, Some(max)) => parts.push(format!("at most {max} characters")),
            (None, None) => {}
        }
        if let Some(ch) = self.contains_character {
            if ch.is_ascii_lowercase() {
                parts.push(format!("containing the letter {ch}"));
            } else {
                parts.push(format!("containing the character {ch}"));
            }
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    fn check(predicate: &FilterPredicate, value: &str) -> bool {
        predicate.matches(value, &analyze(value))
    }

    #[test]
    fn empty_predicate_matches_everything() {
        let p = FilterPredicate::default();
        assert!(p.is_empty());
        assert!(check(&p, "anything"));
        assert!(check(&p, ""));
    }

    #[test]
    fn fields_combine_with_and() {
        let p = FilterPredicate {
            is_palindrome: Some(true),
            word_count: Some(1),
            ..Default::default()
        };
        assert!(check(&p, "racecar"));
        assert!(!check(&p, "race car"));
        assert!(!check(&p, "hello"));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let p = FilterPredicate {
            min_length: Some(5),
            max_length: Some(7),
            ..Default::default()
        };
        assert!(!check(&p, "four"));
        assert!(check(&p, "fiver"));
        assert!(check(&p, "sevenas"));
        assert!(!check(&p, "eightabc"));
    }

    #[test]
    fn contains_character_is_case_sensitive() {
        let p = FilterPredicate {
            contains_character: Some('z'),
            ..Default::default()
        };
        assert!(check(&p, "pizza"));
        assert!(!check(&p, "PIZZA"));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let p = FilterPredicate {
            min_length: Some(11),
            max_length: Some(4),
            ..Default::default()
        };
        assert_eq!(
            p.validate(),
            Err(QueryError::ConflictingBounds { min: 11, max: 4 })
        );

        let ok = FilterPredicate {
            min_length: Some(4),
            max_length: Some(4),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn serializes_only_present_fields() {
        let p = FilterPredicate {
            word_count: Some(1),
            is_palindrome: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, serde_json::json!({"is_palindrome": true, "word_count": 1}));
    }

    #[test]
    fn contains_character_serializes_as_string() {
        let p = FilterPredicate {
            contains_character: Some('z'),
            ..Default::default()
        };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"contains_character":"z"}"#);
        let back: FilterPredicate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn canonical_phrasing() {
        let p = FilterPredicate {
            is_palindrome: Some(true),
            word_count: Some(1),
            min_length: Some(3),
            max_length: Some(9),
            contains_character: Some('a'),
        };
        assert_eq!(
            p.to_query(),
            "single word palindromic strings between 3 and 9 characters containing the letter a"
        );
    }

    #[test]
    fn canonical_phrasing_reparses_to_same_predicate() {
        let cases = [
            "all single word palindromic strings",
            "strings longer than 10 characters",
            "strings shorter than 5 characters",
            "strings between 5 and 10 characters",
            "strings containing the letter z",
            "two word strings",
            "strings with exactly 7 characters",
            "not palindromic strings",
            "strings at least 20 characters long",
            "empty strings",
            "palindromic strings containing the first vowel",
        ];
        for query in cases {
            let parsed = parse_query(query).unwrap();
            let reparsed = parse_query(&parsed.to_query()).unwrap();
            assert_eq!(reparsed, parsed, "round trip of {query:?}");
        }
    }
}
