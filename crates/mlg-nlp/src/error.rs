//! Error types for query parsing and context resolution.

use thiserror::Error;

/// Errors produced while turning a natural-language query into a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No detector recognized anything in the query.
    #[error("could not parse query. Try queries like: {}", quoted_list(.examples))]
    Unrecognized { examples: Vec<String> },

    /// A numeric phrase produced a bound that cannot be represented.
    #[error("'{phrase}' is out of range")]
    OutOfRange { phrase: String },

    /// Both length bounds are present and min exceeds max.
    #[error("conflicting filters: min_length {min} is greater than max_length {max}")]
    ConflictingBounds { min: usize, max: usize },
}

impl QueryError {
    /// The error raised when zero detectors fire.
    pub fn unrecognized() -> Self {
        Self::Unrecognized {
            examples: vec![
                "all single word palindromes".into(),
                "strings longer than 10 characters".into(),
                "strings containing the letter z".into(),
            ],
        }
    }
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|q| format!("'{q}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias for query parsing results.
pub type QueryResult<T> = Result<T, QueryError>;

/// A follow-up translation referenced earlier text, but none was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no previous text to translate into '{target_language}'")]
pub struct MissingContext {
    pub target_language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_message_lists_examples() {
        let message = QueryError::unrecognized().to_string();
        assert!(message.starts_with("could not parse query"));
        assert!(message.contains("'strings longer than 10 characters'"));
        assert!(message.contains("'strings containing the letter z'"));
    }

    #[test]
    fn conflicting_bounds_message() {
        let err = QueryError::ConflictingBounds { min: 11, max: 4 };
        assert_eq!(
            err.to_string(),
            "conflicting filters: min_length 11 is greater than max_length 4"
        );
    }
}
