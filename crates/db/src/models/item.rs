//! Item entity model and DTOs.

use exchange_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `items` table.
///
/// `status` is stored as lowercase TEXT and parsed into
/// `exchange_core::status::ItemStatus` where the domain layer needs it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub posted_by: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: String,
    /// JSON array of hosted image delivery URLs.
    pub image_urls: serde_json::Value,
    /// Deprecated single-URL column, still populated on imported rows.
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub image_urls: Option<Vec<String>>,
}

/// DTO for updating an existing item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// Optional filters for item listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub posted_by: Option<DbId>,
}
