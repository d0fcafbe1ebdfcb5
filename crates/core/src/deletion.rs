//! Owner-initiated item deletion.
//!
//! [`delete_item_as_owner`] runs a fixed guard sequence against an injected
//! [`ItemDeletionBackend`], then performs best-effort remote image cleanup
//! and finally deletes the item row. The guards short-circuit in order so
//! the most specific failure (ownership) is reported before the more
//! general conflict.
//!
//! Nothing locks the gap between the guard reads and the final delete: a
//! concurrent request can create an active exchange, or delete the item,
//! between step 1 and step 6. The window is narrowed by re-querying active
//! exchanges immediately before the delete, but it is an accepted race --
//! the backing store is the only arbiter.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::media;
use crate::status::ItemStatus;
use crate::types::DbId;

/// Conflict message shared by the item-status and active-exchange guards.
/// Callers intentionally cannot tell which of the two checks fired.
pub const CONFLICT_ACTIVE_EXCHANGE: &str = "Cannot delete item with active exchange";

/// Per-request deletion input. Never persisted.
#[derive(Debug, Clone, Copy)]
pub struct DeleteItemContext {
    pub item_id: DbId,
    pub requester_id: DbId,
}

/// The item fields the deletion workflow reads.
#[derive(Debug, Clone)]
pub struct ItemSnapshot {
    pub id: DbId,
    pub posted_by: DbId,
    pub status: ItemStatus,
    /// Stored JSON array of hosted image URLs.
    pub image_urls: serde_json::Value,
    /// Deprecated single-URL column, still populated on old rows.
    pub image_url: Option<String>,
}

/// The four capabilities the deletion workflow needs from the outside
/// world. Production binds this to the database pool and the Cloudinary
/// client; tests substitute an in-memory fake.
#[async_trait]
pub trait ItemDeletionBackend: Send + Sync {
    /// Fetch the item by id, or `None` when no such row exists. A missing
    /// row is a normal outcome, not an error.
    async fn fetch_item(&self, item_id: DbId) -> Result<Option<ItemSnapshot>, CoreError>;

    /// Whether at least one exchange referencing the item is active
    /// (pending, accepted, or in_progress).
    async fn has_active_exchange(&self, item_id: DbId) -> Result<bool, CoreError>;

    /// Delete the item row.
    async fn delete_item(&self, item_id: DbId) -> Result<(), CoreError>;

    /// Delete the given hosted images in one batch.
    async fn delete_images(&self, public_ids: &[String]) -> Result<(), CoreError>;
}

/// Delete an item on behalf of its owner.
///
/// Guard sequence, in strict order:
/// 1. the item must exist (`NotFound`)
/// 2. the requester must be the recorded owner (`Forbidden`)
/// 3. the item's own status must not be `pending` (`Conflict`)
/// 4. no exchange referencing the item may be active (`Conflict`, same
///    message as step 3 -- both checks are kept deliberately, since a
///    pending item without a matching exchange row can exist after a data
///    inconsistency)
/// 5. remote image cleanup, best-effort: failures are logged and swallowed
/// 6. the item row is deleted; a failure here propagates untouched, since
///    every precondition held and it indicates an infrastructure problem
///
/// Single linear attempt per invocation, no retries, no cached state.
pub async fn delete_item_as_owner(
    ctx: &DeleteItemContext,
    backend: &dyn ItemDeletionBackend,
) -> Result<(), CoreError> {
    let item = backend
        .fetch_item(ctx.item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Item",
            id: ctx.item_id,
        })?;

    if item.posted_by != ctx.requester_id {
        return Err(CoreError::Forbidden("You do not own this item".into()));
    }

    if item.status == ItemStatus::Pending {
        return Err(CoreError::Conflict(CONFLICT_ACTIVE_EXCHANGE.into()));
    }

    if backend.has_active_exchange(ctx.item_id).await? {
        return Err(CoreError::Conflict(CONFLICT_ACTIVE_EXCHANGE.into()));
    }

    let public_ids = media::collect_item_image_ids(Some(&item.image_urls), item.image_url.as_deref());
    if !public_ids.is_empty() {
        // Cleanup is an optimization, not a correctness requirement of the
        // deletion; the catch must wrap only this call so a failure of the
        // authoritative delete below still propagates.
        if let Err(e) = backend.delete_images(&public_ids).await {
            tracing::warn!(
                item_id = ctx.item_id,
                count = public_ids.len(),
                error = %e,
                "Remote image cleanup failed, continuing with item delete"
            );
        }
    }

    backend.delete_item(ctx.item_id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    /// Records every backend call so tests can assert on invocation order
    /// and arguments.
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        FetchItem(DbId),
        HasActiveExchange(DbId),
        DeleteImages(Vec<String>),
        DeleteItem(DbId),
    }

    struct FakeBackend {
        item: Option<ItemSnapshot>,
        active_exchange: bool,
        fail_image_delete: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeBackend {
        fn new(item: Option<ItemSnapshot>) -> Self {
            Self {
                item,
                active_exchange: false,
                fail_image_delete: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ItemDeletionBackend for FakeBackend {
        async fn fetch_item(&self, item_id: DbId) -> Result<Option<ItemSnapshot>, CoreError> {
            self.record(Call::FetchItem(item_id));
            Ok(self.item.clone())
        }

        async fn has_active_exchange(&self, item_id: DbId) -> Result<bool, CoreError> {
            self.record(Call::HasActiveExchange(item_id));
            Ok(self.active_exchange)
        }

        async fn delete_item(&self, item_id: DbId) -> Result<(), CoreError> {
            self.record(Call::DeleteItem(item_id));
            Ok(())
        }

        async fn delete_images(&self, public_ids: &[String]) -> Result<(), CoreError> {
            self.record(Call::DeleteImages(public_ids.to_vec()));
            if self.fail_image_delete {
                Err(CoreError::Internal("image host unreachable".into()))
            } else {
                Ok(())
            }
        }
    }

    fn available_item(posted_by: DbId) -> ItemSnapshot {
        ItemSnapshot {
            id: 10,
            posted_by,
            status: ItemStatus::Available,
            image_urls: serde_json::json!([
                "https://res.cloudinary.com/demo/image/upload/v1/rmu-exchange/items/abc123.jpg"
            ]),
            image_url: None,
        }
    }

    fn ctx(item_id: DbId, requester_id: DbId) -> DeleteItemContext {
        DeleteItemContext {
            item_id,
            requester_id,
        }
    }

    #[tokio::test]
    async fn missing_item_is_not_found_and_nothing_else_runs() {
        let backend = FakeBackend::new(None);

        let err = delete_item_as_owner(&ctx(99, 1), &backend).await.unwrap_err();

        assert_matches!(err, CoreError::NotFound { entity: "Item", id: 99 });
        assert_eq!(backend.calls(), vec![Call::FetchItem(99)]);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_without_mutation() {
        let backend = FakeBackend::new(Some(available_item(1)));

        let err = delete_item_as_owner(&ctx(10, 2), &backend).await.unwrap_err();

        assert_matches!(err, CoreError::Forbidden(msg) if msg == "You do not own this item");
        assert_eq!(backend.calls(), vec![Call::FetchItem(10)]);
    }

    #[tokio::test]
    async fn pending_item_conflicts_before_the_exchange_query() {
        let mut item = available_item(1);
        item.status = ItemStatus::Pending;
        let mut backend = FakeBackend::new(Some(item));
        // Even with no exchange rows on record, the status check fires.
        backend.active_exchange = false;

        let err = delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap_err();

        assert_matches!(err, CoreError::Conflict(msg) if msg == CONFLICT_ACTIVE_EXCHANGE);
        assert_eq!(backend.calls(), vec![Call::FetchItem(10)]);
    }

    #[tokio::test]
    async fn active_exchange_conflicts_with_the_same_message() {
        let mut backend = FakeBackend::new(Some(available_item(1)));
        backend.active_exchange = true;

        let err = delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap_err();

        assert_matches!(err, CoreError::Conflict(msg) if msg == CONFLICT_ACTIVE_EXCHANGE);
        assert_eq!(
            backend.calls(),
            vec![Call::FetchItem(10), Call::HasActiveExchange(10)]
        );
    }

    #[tokio::test]
    async fn success_deletes_images_then_item() {
        let backend = FakeBackend::new(Some(available_item(1)));

        delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                Call::FetchItem(10),
                Call::HasActiveExchange(10),
                Call::DeleteImages(vec!["rmu-exchange/items/abc123".to_string()]),
                Call::DeleteItem(10),
            ]
        );
    }

    #[tokio::test]
    async fn image_cleanup_failure_does_not_block_the_delete() {
        let mut backend = FakeBackend::new(Some(available_item(1)));
        backend.fail_image_delete = true;

        delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap();

        let calls = backend.calls();
        assert!(calls.contains(&Call::DeleteItem(10)));
    }

    #[tokio::test]
    async fn item_without_images_skips_remote_cleanup() {
        let mut item = available_item(1);
        item.image_urls = serde_json::json!([]);
        let backend = FakeBackend::new(Some(item));

        delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                Call::FetchItem(10),
                Call::HasActiveExchange(10),
                Call::DeleteItem(10),
            ]
        );
    }

    #[tokio::test]
    async fn legacy_single_url_is_included_in_the_cleanup_batch() {
        let mut item = available_item(1);
        item.image_url = Some("https://host/rmu-exchange/items/legacy.jpg".to_string());
        let backend = FakeBackend::new(Some(item));

        delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap();

        assert!(backend.calls().contains(&Call::DeleteImages(vec![
            "rmu-exchange/items/abc123".to_string(),
            "rmu-exchange/items/legacy".to_string(),
        ])));
    }

    #[tokio::test]
    async fn exchanged_item_with_no_active_exchange_deletes_cleanly() {
        let mut item = available_item(1);
        item.status = ItemStatus::Exchanged;
        let backend = FakeBackend::new(Some(item));

        delete_item_as_owner(&ctx(10, 1), &backend).await.unwrap();

        assert!(backend.calls().contains(&Call::DeleteItem(10)));
    }
}
