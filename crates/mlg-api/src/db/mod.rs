//! Database access layer for PostgreSQL.
//!
//! Each sub-module provides typed query functions over a `PgPool`.

pub mod conversations;
pub mod strings;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connect to PostgreSQL and run migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::raw_sql(include_str!("../../migrations/001_strings.sql"))
        .execute(&pool)
        .await?;
    sqlx::raw_sql(include_str!("../../migrations/002_conversation_messages.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("migrations complete");

    Ok(pool)
}
