//! Repository for the `exchanges` table.

use exchange_core::status::ACTIVE_EXCHANGE_STATUSES;
use exchange_core::types::DbId;
use sqlx::PgPool;

use crate::models::exchange::Exchange;

/// Column list for `exchanges` queries.
const COLUMNS: &str =
    "id, item_id, owner_id, requester_id, status, message, created_at, updated_at";

/// Provides CRUD operations for exchanges.
pub struct ExchangeRepo;

impl ExchangeRepo {
    /// Insert a new `pending` exchange.
    pub async fn create(
        pool: &PgPool,
        item_id: DbId,
        owner_id: DbId,
        requester_id: DbId,
        message: Option<&str>,
    ) -> Result<Exchange, sqlx::Error> {
        let query = format!(
            "INSERT INTO exchanges (item_id, owner_id, requester_id, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exchange>(&query)
            .bind(item_id)
            .bind(owner_id)
            .bind(requester_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// Fetch a single exchange by id.
    pub async fn find_by_id(
        pool: &PgPool,
        exchange_id: DbId,
    ) -> Result<Option<Exchange>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exchanges WHERE id = $1");
        sqlx::query_as::<_, Exchange>(&query)
            .bind(exchange_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's exchanges, newest first.
    ///
    /// `role` narrows the listing to `"owner"` or `"requester"` sides;
    /// any other value (or `None`) returns both.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        role: Option<&str>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Exchange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exchanges \
             WHERE CASE $2::text \
                     WHEN 'owner' THEN owner_id = $1 \
                     WHEN 'requester' THEN requester_id = $1 \
                     ELSE owner_id = $1 OR requester_id = $1 \
                   END \
               AND ($3::text IS NULL OR status = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Exchange>(&query)
            .bind(user_id)
            .bind(role)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set an exchange's status. Returns `None` when the exchange does not
    /// exist.
    pub async fn update_status(
        pool: &PgPool,
        exchange_id: DbId,
        status: &str,
    ) -> Result<Option<Exchange>, sqlx::Error> {
        let query = format!(
            "UPDATE exchanges SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exchange>(&query)
            .bind(exchange_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Whether at least one exchange referencing the item is active
    /// (pending, accepted, or in_progress).
    pub async fn has_active_for_item(pool: &PgPool, item_id: DbId) -> Result<bool, sqlx::Error> {
        let statuses: Vec<String> = ACTIVE_EXCHANGE_STATUSES
            .iter()
            .map(|s| s.to_string())
            .collect();
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM exchanges WHERE item_id = $1 AND status = ANY($2))",
        )
        .bind(item_id)
        .bind(&statuses)
        .fetch_one(pool)
        .await
    }
}
