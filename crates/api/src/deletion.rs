//! Live binding of the item-deletion capability contract.
//!
//! [`LiveItemDeletionBackend`] implements
//! [`exchange_core::deletion::ItemDeletionBackend`] against the PostgreSQL
//! pool and the Cloudinary client, so the workflow in `exchange_core` runs
//! identically in production and against the in-memory fake used by its
//! tests.

use std::sync::Arc;

use async_trait::async_trait;
use exchange_core::deletion::{ItemDeletionBackend, ItemSnapshot};
use exchange_core::error::CoreError;
use exchange_core::status::ItemStatus;
use exchange_core::types::DbId;
use exchange_db::repositories::{ExchangeRepo, ItemRepo};
use exchange_db::DbPool;
use exchange_media::MediaClient;

/// Production deletion backend: PostgreSQL + Cloudinary.
pub struct LiveItemDeletionBackend {
    pool: DbPool,
    media: Arc<MediaClient>,
}

impl LiveItemDeletionBackend {
    pub fn new(pool: DbPool, media: Arc<MediaClient>) -> Self {
        Self { pool, media }
    }
}

/// Wrap a sqlx failure as an opaque internal error, keeping the detail in
/// the server-side log only.
fn db_internal(e: sqlx::Error) -> CoreError {
    tracing::error!(error = %e, "Database error in deletion backend");
    CoreError::Internal(e.to_string())
}

#[async_trait]
impl ItemDeletionBackend for LiveItemDeletionBackend {
    async fn fetch_item(&self, item_id: DbId) -> Result<Option<ItemSnapshot>, CoreError> {
        let Some(row) = ItemRepo::find_by_id(&self.pool, item_id)
            .await
            .map_err(db_internal)?
        else {
            return Ok(None);
        };

        let status = ItemStatus::parse(&row.status).ok_or_else(|| {
            CoreError::Internal(format!("Unknown item status in row {}: {}", row.id, row.status))
        })?;

        Ok(Some(ItemSnapshot {
            id: row.id,
            posted_by: row.posted_by,
            status,
            image_urls: row.image_urls,
            image_url: row.image_url,
        }))
    }

    async fn has_active_exchange(&self, item_id: DbId) -> Result<bool, CoreError> {
        ExchangeRepo::has_active_for_item(&self.pool, item_id)
            .await
            .map_err(db_internal)
    }

    async fn delete_item(&self, item_id: DbId) -> Result<(), CoreError> {
        let deleted = ItemRepo::delete(&self.pool, item_id)
            .await
            .map_err(db_internal)?;
        if !deleted {
            // A concurrent request removed the row between the guard reads
            // and this delete; the end state is the one we wanted.
            tracing::debug!(item_id, "Item already deleted by a concurrent request");
        }
        Ok(())
    }

    async fn delete_images(&self, public_ids: &[String]) -> Result<(), CoreError> {
        self.media
            .delete_images(public_ids)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))
    }
}
