//! Repository for the `messages` table.

use exchange_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::Message;

/// Column list for `messages` queries.
const COLUMNS: &str = "id, exchange_id, sender_id, body, created_at";

/// Provides CRUD operations for chat messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message to an exchange's conversation.
    pub async fn create(
        pool: &PgPool,
        exchange_id: DbId,
        sender_id: DbId,
        body: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (exchange_id, sender_id, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(exchange_id)
            .bind(sender_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// List an exchange's messages in chronological order.
    pub async fn list_for_exchange(
        pool: &PgPool,
        exchange_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE exchange_id = $1 \
             ORDER BY created_at ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(exchange_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
