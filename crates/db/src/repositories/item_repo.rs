//! Repository for the `items` table.

use exchange_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, ItemFilter, UpdateItem};

/// Column list for `items` queries.
const COLUMNS: &str =
    "id, posted_by, title, description, category, status, image_urls, image_url, \
     created_at, updated_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item with status `available`.
    pub async fn create(
        pool: &PgPool,
        posted_by: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let image_urls = serde_json::json!(input.image_urls.clone().unwrap_or_default());
        let query = format!(
            "INSERT INTO items (posted_by, title, description, category, image_urls) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(posted_by)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&image_urls)
            .fetch_one(pool)
            .await
    }

    /// Fetch a single item by id.
    pub async fn find_by_id(pool: &PgPool, item_id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(item_id)
            .fetch_optional(pool)
            .await
    }

    /// List items, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        filter: &ItemFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::bigint IS NULL OR posted_by = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&filter.category)
            .bind(&filter.status)
            .bind(filter.posted_by)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Partially update an item. Returns `None` when the item does not exist.
    pub async fn update(
        pool: &PgPool,
        item_id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let image_urls = input
            .image_urls
            .as_ref()
            .map(|urls| serde_json::json!(urls));
        let query = format!(
            "UPDATE items SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                category = COALESCE($4, category), \
                image_urls = COALESCE($5, image_urls), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(item_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&image_urls)
            .fetch_optional(pool)
            .await
    }

    /// Set an item's lifecycle status. Returns `false` when no row matched.
    pub async fn set_status(
        pool: &PgPool,
        item_id: DbId,
        status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE items SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(item_id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete an item row. Returns `false` when no row matched (e.g.
    /// a concurrent request already deleted it).
    pub async fn delete(pool: &PgPool, item_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
