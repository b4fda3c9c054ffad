//! Queries over the `strings` table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mlg_nlp::{FilterPredicate, StringProperties};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::store::StoredString;

/// String row returned from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StringRow {
    pub id: String,
    pub value: String,
    pub length: i64,
    pub is_palindrome: bool,
    pub unique_characters: i64,
    pub word_count: i64,
    pub sha256_hash: String,
    pub character_frequency_map: Json<BTreeMap<String, usize>>,
    pub created_at: DateTime<Utc>,
}

fn to_db(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn from_db(n: i64) -> usize {
    usize::try_from(n).unwrap_or_default()
}

impl From<StringRow> for StoredString {
    fn from(row: StringRow) -> Self {
        Self {
            id: row.id,
            value: row.value,
            properties: StringProperties {
                length: from_db(row.length),
                is_palindrome: row.is_palindrome,
                unique_characters: from_db(row.unique_characters),
                word_count: from_db(row.word_count),
                sha256_hash: row.sha256_hash,
                character_frequency_map: row.character_frequency_map.0,
            },
            created_at: row.created_at,
        }
    }
}

/// Insert a new string.
pub async fn insert(pool: &PgPool, record: &StoredString) -> Result<(), sqlx::Error> {
    let props = &record.properties;
    sqlx::query(
        "INSERT INTO strings (id, value, length, is_palindrome, unique_characters, word_count, sha256_hash, character_frequency_map, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(&record.id)
    .bind(&record.value)
    .bind(to_db(props.length))
    .bind(props.is_palindrome)
    .bind(to_db(props.unique_characters))
    .bind(to_db(props.word_count))
    .bind(&props.sha256_hash)
    .bind(Json(&props.character_frequency_map))
    .bind(record.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Get a string by its exact value.
pub async fn get_by_value(pool: &PgPool, value: &str) -> Result<Option<StringRow>, sqlx::Error> {
    sqlx::query_as::<_, StringRow>("SELECT * FROM strings WHERE value = $1")
        .bind(value)
        .fetch_optional(pool)
        .await
}

/// Strings matching every condition of `filter`, oldest first.
pub async fn list(pool: &PgPool, filter: &FilterPredicate) -> Result<Vec<StringRow>, sqlx::Error> {
    let mut query = filter_query(filter);
    query.build_query_as::<StringRow>().fetch_all(pool).await
}

fn filter_query(filter: &FilterPredicate) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT * FROM strings WHERE TRUE");
    if let Some(is_palindrome) = filter.is_palindrome {
        query.push(" AND is_palindrome = ").push_bind(is_palindrome);
    }
    if let Some(min) = filter.min_length {
        query.push(" AND length >= ").push_bind(to_db(min));
    }
    if let Some(max) = filter.max_length {
        query.push(" AND length <= ").push_bind(to_db(max));
    }
    if let Some(words) = filter.word_count {
        query.push(" AND word_count = ").push_bind(to_db(words));
    }
    if let Some(ch) = filter.contains_character {
        query
            .push(" AND strpos(value, ")
            .push_bind(ch.to_string())
            .push(") > 0");
    }
    query.push(" ORDER BY created_at, id");
    query
}

/// Delete a string by value. Returns whether a row was removed.
pub async fn delete_by_value(pool: &PgPool, value: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM strings WHERE value = $1")
        .bind(value)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
