//! Queries over the `conversation_messages` table.

use sqlx::PgPool;
use uuid::Uuid;

/// One persisted chat message.
#[derive(Debug, Clone)]
pub struct MessageRow {
    pub conversation_id: Uuid,
    /// "user" or "agent".
    pub role: &'static str,
    pub content: String,
    /// Text the message was about, for follow-up references.
    pub subject: Option<String>,
    pub intent: Option<String>,
}

/// Insert a message.
pub async fn insert(pool: &PgPool, row: &MessageRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO conversation_messages (id, conversation_id, role, content, subject, intent)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(Uuid::now_v7())
    .bind(row.conversation_id)
    .bind(row.role)
    .bind(&row.content)
    .bind(&row.subject)
    .bind(&row.intent)
    .execute(pool)
    .await?;
    Ok(())
}

/// The most recent user subject in a conversation.
pub async fn last_subject(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT subject FROM conversation_messages
         WHERE conversation_id = $1 AND role = 'user' AND subject IS NOT NULL
         ORDER BY created_at DESC, id DESC
         LIMIT 1",
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await
}
