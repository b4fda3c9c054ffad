//! String metrics: length, palindrome check, distinct characters, word
//! count, SHA-256 content hash and character frequency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Computed properties of a stored string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: BTreeMap<String, usize>,
}

impl StringProperties {
    /// The most frequent character, lowest character first on ties.
    pub fn most_common_character(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (ch, &count) in &self.character_frequency_map {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((ch.as_str(), count)),
            }
        }
        best.map(|(ch, _)| ch)
    }
}

/// Number of characters (Unicode scalar values).
pub fn length(value: &str) -> usize {
    value.chars().count()
}

/// Case-insensitive palindrome check. Spaces and punctuation count.
pub fn is_palindrome(value: &str) -> bool {
    let normalized: Vec<char> = value.to_lowercase().chars().collect();
    normalized.iter().eq(normalized.iter().rev())
}

/// Count of distinct characters, case-sensitive.
pub fn unique_characters(value: &str) -> usize {
    let mut seen: Vec<char> = value.chars().collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Count of whitespace-separated words.
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Lowercase hex SHA-256 of the UTF-8 bytes.
pub fn sha256_hash(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Occurrence count per character.
pub fn character_frequency(value: &str) -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    for ch in value.chars() {
        *map.entry(ch.to_string()).or_insert(0) += 1;
    }
    map
}

/// Compute every property of `value`.
pub fn analyze(value: &str) -> StringProperties {
    StringProperties {
        length: length(value),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        sha256_hash: sha256_hash(value),
        character_frequency_map: character_frequency(value),
    }
}
