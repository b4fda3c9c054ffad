//! TTL cache for translation results.
//!
//! Entries expire `ttl` after insertion. When an insert pushes the cache
//! past `max_entries`, expired entries are purged first; if it is still
//! over, the `evict_count` oldest entries are dropped.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::types::Translation;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_MAX_ENTRIES: usize = 1000;
pub const DEFAULT_EVICT_COUNT: usize = 200;

/// Cache key: exact text, target language, and source (or "auto").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    target: String,
    source: String,
}

impl CacheKey {
    pub fn new(text: &str, target: &str, source: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            target: target.to_string(),
            source: source.unwrap_or("auto").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub ttl_seconds: u64,
}

#[derive(Debug)]
pub struct TranslationCache {
    entries: HashMap<CacheKey, (Translation, Instant)>,
    ttl: Duration,
    max_entries: usize,
    evict_count: usize,
}

impl TranslationCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_limits(ttl, DEFAULT_MAX_ENTRIES, DEFAULT_EVICT_COUNT)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize, evict_count: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries,
            evict_count,
        }
    }

    /// Cached translation, if present and fresh. Expired entries are removed.
    pub fn get(&mut self, key: &CacheKey) -> Option<Translation> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: CacheKey, value: Translation) {
        self.insert_at(key, value, Instant::now());
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn evict_expired(&mut self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats_at(Instant::now())
    }

    fn is_fresh(&self, stored: Instant, now: Instant) -> bool {
        now.saturating_duration_since(stored) < self.ttl
    }

    fn get_at(&mut self, key: &CacheKey, now: Instant) -> Option<Translation> {
        let (value, stored) = self.entries.get(key)?;
        if self.is_fresh(*stored, now) {
            return Some(value.clone());
        }
        self.entries.remove(key);
        None
    }

    fn evict_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, stored)| now.saturating_duration_since(*stored) < ttl);
        before - self.entries.len()
    }

    fn insert_at(&mut self, key: CacheKey, value: Translation, now: Instant) {
        self.entries.insert(key, (value, now));
        if self.entries.len() > self.max_entries {
            let purged = self.evict_expired_at(now);
            if purged > 0 {
                tracing::debug!(purged, "expired translations purged");
            }
        }
        if self.entries.len() > self.max_entries {
            let mut by_age: Vec<(Instant, CacheKey)> = self
                .entries
                .iter()
                .map(|(key, (_, stored))| (*stored, key.clone()))
                .collect();
            by_age.sort_by_key(|(stored, _)| *stored);
            for (_, key) in by_age.into_iter().take(self.evict_count) {
                self.entries.remove(&key);
            }
            tracing::debug!(remaining = self.entries.len(), "translation cache trimmed");
        }
    }

    fn stats_at(&self, now: Instant) -> CacheStats {
        let valid_entries = self
            .entries
            .values()
            .filter(|(_, stored)| self.is_fresh(*stored, now))
            .count();
        CacheStats {
            total_entries: self.entries.len(),
            valid_entries,
            expired_entries: self.entries.len() - valid_entries,
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
