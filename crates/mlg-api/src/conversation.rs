//! Conversation history: the last text each conversation talked about.
//!
//! The in-memory map is authoritative while the process runs. With a
//! database pool, turns are also written out on a spawned task and a miss
//! in memory falls back to the most recent persisted subject.
//!
//! The map holds at most `max_conversations` entries. Recording past that
//! drops the `evict_count` least recently touched conversations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use mlg_nlp::{ConversationContext, IntentKind};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::conversations::{self, MessageRow};

/// One user message and the agent's reply.
#[derive(Debug, Clone)]
pub struct Turn {
    pub message: String,
    pub subject: Option<String>,
    pub intent: IntentKind,
    pub reply: String,
}

pub const DEFAULT_MAX_CONVERSATIONS: usize = 10_000;
pub const DEFAULT_EVICT_COUNT: usize = 1_000;

/// Remembered subject and the last time it was written.
type Subjects = HashMap<Uuid, (String, Instant)>;

#[derive(Clone)]
pub struct ConversationStore {
    pool: Option<PgPool>,
    last_texts: Arc<RwLock<Subjects>>,
    max_conversations: usize,
    evict_count: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_CONVERSATIONS, DEFAULT_EVICT_COUNT)
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            pool: Some(pool),
            ..Self::default()
        }
    }

    pub fn with_limits(max_conversations: usize, evict_count: usize) -> Self {
        Self {
            pool: None,
            last_texts: Arc::default(),
            max_conversations,
            evict_count: evict_count.max(1),
        }
    }

    /// Context for the next message in `conversation_id`.
    pub async fn context(&self, conversation_id: Uuid) -> ConversationContext {
        if let Some((text, _)) = self.last_texts.read().await.get(&conversation_id) {
            return ConversationContext::new(text.clone());
        }

        if let Some(pool) = &self.pool {
            match conversations::last_subject(pool, conversation_id).await {
                Ok(Some(text)) => {
                    self.remember(conversation_id, text.clone()).await;
                    return ConversationContext::new(text);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, %conversation_id, "conversation lookup failed");
                }
            }
        }

        ConversationContext::default()
    }

    /// Remember a turn. Persistence is best-effort and never blocks the reply.
    pub async fn record(&self, conversation_id: Uuid, turn: Turn) {
        if let Some(subject) = &turn.subject {
            self.remember(conversation_id, subject.clone()).await;
        }

        let Some(pool) = self.pool.clone() else {
            return;
        };
        tokio::spawn(async move {
            let user = MessageRow {
                conversation_id,
                role: "user",
                content: turn.message,
                subject: turn.subject,
                intent: Some(turn.intent.as_str().to_string()),
            };
            let agent = MessageRow {
                conversation_id,
                role: "agent",
                content: turn.reply,
                subject: None,
                intent: None,
            };
            for row in [user, agent] {
                if let Err(e) = conversations::insert(&pool, &row).await {
                    tracing::warn!(error = %e, %conversation_id, "failed to persist conversation message");
                    break;
                }
            }
        });
    }

    async fn remember(&self, conversation_id: Uuid, text: String) {
        let mut last_texts = self.last_texts.write().await;
        last_texts.insert(conversation_id, (text, Instant::now()));
        if last_texts.len() > self.max_conversations {
            let mut by_age: Vec<(Instant, Uuid)> = last_texts
                .iter()
                .map(|(id, (_, touched))| (*touched, *id))
                .collect();
            by_age.sort_unstable();
            for (_, id) in by_age.into_iter().take(self.evict_count) {
                last_texts.remove(&id);
            }
            tracing::debug!(remaining = last_texts.len(), "conversation history trimmed");
        }
    }

    /// Number of conversations with a remembered subject.
    pub async fn conversation_count(&self) -> usize {
        self.last_texts.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(message: &str, subject: Option<&str>) -> Turn {
        Turn {
            message: message.into(),
            subject: subject.map(String::from),
            intent: IntentKind::Translate,
            reply: "ok".into(),
        }
    }

    #[tokio::test]
    async fn empty_conversation_has_no_context() {
        let store = ConversationStore::new();
        let context = store.context(Uuid::now_v7()).await;
        assert!(context.last_text().is_none());
    }

    #[tokio::test]
    async fn remembers_latest_subject() {
        let store = ConversationStore::new();
        let id = Uuid::now_v7();
        store.record(id, turn("translate 'hello' to french", Some("hello"))).await;
        store.record(id, turn("help", None)).await;

        assert_eq!(store.context(id).await.last_text(), Some("hello"));

        store.record(id, turn("analyze 'racecar'", Some("racecar"))).await;
        assert_eq!(store.context(id).await.last_text(), Some("racecar"));
    }

    #[tokio::test]
    async fn conversations_are_isolated() {
        let store = ConversationStore::new();
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        store.record(a, turn("m", Some("first"))).await;

        assert!(store.context(b).await.last_text().is_none());
        assert_eq!(store.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn history_is_bounded() {
        let store = ConversationStore::with_limits(100, 10);
        let ids: Vec<Uuid> = (0..1_000).map(|_| Uuid::now_v7()).collect();
        for (i, id) in ids.iter().enumerate() {
            store.record(*id, turn("m", Some(&format!("text {i}")))).await;
        }

        assert!(store.conversation_count().await <= 100);
        let newest = ids.last().copied().unwrap();
        assert_eq!(store.context(newest).await.last_text(), Some("text 999"));
    }

    #[tokio::test]
    async fn overflow_drops_least_recently_touched() {
        let store = ConversationStore::with_limits(3, 1);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::now_v7()).collect();
        for id in &ids {
            store.record(*id, turn("m", Some("x"))).await;
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        // Touch the oldest so the second becomes least recent.
        store.record(ids[0], turn("m", Some("again"))).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        store.record(Uuid::now_v7(), turn("m", Some("new"))).await;

        assert_eq!(store.conversation_count().await, 3);
        assert_eq!(store.context(ids[0]).await.last_text(), Some("again"));
        assert!(store.context(ids[1]).await.last_text().is_none());
        assert_eq!(store.context(ids[2]).await.last_text(), Some("x"));
    }
}
