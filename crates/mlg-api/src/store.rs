//! String storage behind a trait, with PostgreSQL and in-memory backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mlg_nlp::{FilterPredicate, StringProperties, analyze};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::db;

/// A stored string and its computed properties. `id` is the SHA-256 hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredString {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StoredString {
    /// Analyze `value` and stamp it with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("string already exists: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for analyzed strings.
#[async_trait]
pub trait StringStore: Send + Sync {
    /// Store a new record. Fails with `Conflict` if its hash is present.
    async fn insert(&self, record: StoredString) -> StoreResult<StoredString>;

    /// Look up a record by its exact value.
    async fn get(&self, value: &str) -> StoreResult<Option<StoredString>>;

    /// Records matching every condition of `filter`, oldest first.
    async fn list(&self, filter: &FilterPredicate) -> StoreResult<Vec<StoredString>>;

    /// Remove a record by exact value. Returns whether one existed.
    async fn delete(&self, value: &str) -> StoreResult<bool>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Backend name for health output.
    fn backend(&self) -> &'static str;
}

// ── In-memory ───────────────────────────────────────────────────

/// Insertion-ordered in-memory store (tests and development).
#[derive(Default)]
pub struct MemoryStringStore {
    records: RwLock<Vec<StoredString>>,
}

impl MemoryStringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with `values`, skipping duplicates.
    pub fn with_values(values: &[&str]) -> Self {
        let mut records: Vec<StoredString> = Vec::new();
        for value in values {
            let record = StoredString::new(*value);
            if !records.iter().any(|r| r.id == record.id) {
                records.push(record);
            }
        }
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl StringStore for MemoryStringStore {
    async fn insert(&self, record: StoredString) -> StoreResult<StoredString> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::Conflict(record.id));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, value: &str) -> StoreResult<Option<StoredString>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.value == value).cloned())
    }

    async fn list(&self, filter: &FilterPredicate) -> StoreResult<Vec<StoredString>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.value, &r.properties))
            .cloned()
            .collect())
    }

    async fn delete(&self, value: &str) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.value != value);
        Ok(records.len() != before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

// ── PostgreSQL ──────────────────────────────────────────────────

/// Store backed by the `strings` table.
pub struct PgStringStore {
    pool: PgPool,
}

impl PgStringStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StringStore for PgStringStore {
    async fn insert(&self, record: StoredString) -> StoreResult<StoredString> {
        match db::strings::insert(&self.pool, &record).await {
            Ok(()) => Ok(record),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict(record.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, value: &str) -> StoreResult<Option<StoredString>> {
        let row = db::strings::get_by_value(&self.pool, value).await?;
        Ok(row.map(StoredString::from))
    }

    async fn list(&self, filter: &FilterPredicate) -> StoreResult<Vec<StoredString>> {
        let rows = db::strings::list(&self.pool, filter).await?;
        Ok(rows.into_iter().map(StoredString::from).collect())
    }

    async fn delete(&self, value: &str) -> StoreResult<bool> {
        Ok(db::strings::delete_by_value(&self.pool, value).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
