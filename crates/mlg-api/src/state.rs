//! Shared application state for the Axum server.
//!
//! Supports two modes:
//! - **Database mode**: strings and conversation turns live in PostgreSQL.
//! - **In-memory mode**: everything is held in process (tests and development).

use std::sync::Arc;
use std::time::Duration;

use mlg_translate::{MockTranslator, TranslationCache, Translator};
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::chat::ChatService;
use crate::config::ApiConfig;
use crate::conversation::ConversationStore;
use crate::store::{MemoryStringStore, PgStringStore, StringStore};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StringStore>,
    pub conversations: ConversationStore,
    pub translator: Arc<dyn Translator>,
    /// Shared by the fast chat path and the cache endpoints.
    pub cache: Arc<Mutex<TranslationCache>>,
    pub chat: ChatService,
    pub request_timeout: Duration,
}

impl AppState {
    /// Create state backed by a PostgreSQL pool.
    pub fn with_pool(pool: PgPool, translator: Arc<dyn Translator>, config: &ApiConfig) -> Self {
        Self::build(
            Arc::new(PgStringStore::new(pool.clone())),
            ConversationStore::with_pool(pool),
            translator,
            config,
        )
    }

    /// Create in-memory state around the given translator.
    pub fn in_memory(translator: Arc<dyn Translator>, config: &ApiConfig) -> Self {
        Self::build(
            Arc::new(MemoryStringStore::new()),
            ConversationStore::new(),
            translator,
            config,
        )
    }

    /// Create in-memory state with a mock translator (for tests).
    pub fn new() -> Self {
        Self::in_memory(
            Arc::new(MockTranslator::with_sample_phrases()),
            &ApiConfig::default(),
        )
    }

    /// Create state with sample strings for development / tests.
    pub fn with_sample_data() -> Self {
        Self::build(
            Arc::new(MemoryStringStore::with_values(&[
                "racecar",
                "hello world",
                "level",
                "noon",
                "the quick brown fox",
                "madam",
            ])),
            ConversationStore::new(),
            Arc::new(MockTranslator::with_sample_phrases()),
            &ApiConfig::default(),
        )
    }

    fn build(
        store: Arc<dyn StringStore>,
        conversations: ConversationStore,
        translator: Arc<dyn Translator>,
        config: &ApiConfig,
    ) -> Self {
        let cache = Arc::new(Mutex::new(TranslationCache::new(config.cache_ttl())));
        let chat = ChatService::new(translator.clone(), cache.clone());
        Self {
            store,
            conversations,
            translator,
            cache,
            chat,
            request_timeout: config.api_timeout(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
