//! Handlers for the `/items` resource.
//!
//! Listing and fetching are public; creating, updating, and deleting
//! require authentication. Deletion runs the owner-moderated workflow from
//! `exchange_core::deletion` through the live backend adapter.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use exchange_core::deletion::{delete_item_as_owner, DeleteItemContext};
use exchange_core::error::CoreError;
use exchange_core::item as item_rules;
use exchange_core::pagination::{clamp_limit, clamp_offset};
use exchange_core::roles::ROLE_ADMIN;
use exchange_core::types::DbId;
use exchange_db::models::item::{CreateItem, Item, ItemFilter, UpdateItem};
use exchange_db::repositories::ItemRepo;
use exchange_events::{event_types, PlatformEvent};
use serde::Deserialize;

use crate::deletion::LiveItemDeletionBackend;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the item listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ItemListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub posted_by: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/items
///
/// Public listing, newest first, with optional filters.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemListQuery>,
) -> AppResult<Json<DataResponse<Vec<Item>>>> {
    let filter = ItemFilter {
        category: params.category,
        status: params.status,
        posted_by: params.posted_by,
    };
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let items = ItemRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Item>>> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/items
///
/// Create a listing with status `available`. Publishes `item.created`.
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateItem>,
) -> AppResult<Json<DataResponse<Item>>> {
    item_rules::validate_new_item(&input.title, input.description.as_deref(), &input.category)?;

    let item = ItemRepo::create(&state.pool, user.user_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::ITEM_CREATED)
            .with_source("item", item.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "item_id": item.id,
                "owner_id": user.user_id,
                "title": item.title,
            })),
    );

    Ok(Json(DataResponse { data: item }))
}

/// PUT /api/v1/items/{id}
///
/// Partial update. Only the owner or an admin may edit a listing.
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<DataResponse<Item>>> {
    item_rules::validate_item_update(
        input.title.as_deref(),
        input.description.as_deref(),
        input.category.as_deref(),
    )?;

    let existing = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    if existing.posted_by != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this item".into(),
        )));
    }

    let updated = ItemRepo::update(&state.pool, item_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/items/{id}
///
/// Owner-moderated deletion: ownership and lifecycle guards, best-effort
/// hosted-image cleanup, then the authoritative row delete.
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let ctx = DeleteItemContext {
        item_id,
        requester_id: user.user_id,
    };
    let backend = LiveItemDeletionBackend::new(state.pool.clone(), Arc::clone(&state.media));
    delete_item_as_owner(&ctx, &backend).await?;

    Ok(Json(serde_json::json!({ "data": { "deleted": true } })))
}
