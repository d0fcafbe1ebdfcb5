//! Handlers for the `/exchanges` resource.
//!
//! An exchange ties a requester to an item's owner and moves through a
//! small state machine: `pending` → `accepted` → `completed`, with
//! `rejected` and `cancelled` as terminal side exits. Each transition is
//! restricted to one side of the exchange and to specific current states;
//! anything else is a conflict.

use axum::extract::{Path, Query, State};
use axum::Json;
use exchange_core::error::CoreError;
use exchange_core::pagination::{clamp_limit, clamp_offset};
use exchange_core::status::{ExchangeStatus, ItemStatus};
use exchange_core::types::DbId;
use exchange_db::models::exchange::{CreateExchange, Exchange};
use exchange_db::repositories::{ExchangeRepo, ItemRepo};
use exchange_events::{event_types, PlatformEvent};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the exchange listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ExchangeListQuery {
    /// `owner` or `requester`; anything else returns both sides.
    pub role: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/exchanges
///
/// Request an item. The item must exist, be `available`, and belong to
/// someone else. Flips the item to `pending` and publishes
/// `exchange.requested`.
pub async fn request_exchange(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateExchange>,
) -> AppResult<Json<DataResponse<Exchange>>> {
    let item = ItemRepo::find_by_id(&state.pool, input.item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: input.item_id,
        }))?;

    if item.posted_by == user.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot request your own item".into(),
        )));
    }
    if item.status != ItemStatus::Available.as_str() {
        return Err(AppError::Core(CoreError::Conflict(
            "Item is not available for exchange".into(),
        )));
    }

    let exchange = ExchangeRepo::create(
        &state.pool,
        item.id,
        item.posted_by,
        user.user_id,
        input.message.as_deref(),
    )
    .await?;
    ItemRepo::set_status(&state.pool, item.id, ItemStatus::Pending.as_str()).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::EXCHANGE_REQUESTED)
            .with_source("exchange", exchange.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "exchange_id": exchange.id,
                "item_id": item.id,
                "owner_id": exchange.owner_id,
                "requester_id": exchange.requester_id,
            })),
    );

    Ok(Json(DataResponse { data: exchange }))
}

/// GET /api/v1/exchanges
///
/// List the caller's exchanges, newest first.
pub async fn list_exchanges(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ExchangeListQuery>,
) -> AppResult<Json<DataResponse<Vec<Exchange>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let exchanges = ExchangeRepo::list_for_user(
        &state.pool,
        user.user_id,
        params.role.as_deref(),
        params.status.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: exchanges }))
}

/// GET /api/v1/exchanges/{id}
///
/// Participant-only fetch.
pub async fn get_exchange(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Exchange>>> {
    let exchange = fetch_participant_exchange(&state, exchange_id, user.user_id).await?;
    Ok(Json(DataResponse { data: exchange }))
}

/// POST /api/v1/exchanges/{id}/accept
///
/// Owner accepts a pending request. Publishes `exchange.accepted`.
pub async fn accept_exchange(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Exchange>>> {
    transition(
        &state,
        exchange_id,
        &user,
        Side::Owner,
        &[ExchangeStatus::Pending],
        ExchangeStatus::Accepted,
        None,
        event_types::EXCHANGE_ACCEPTED,
    )
    .await
}

/// POST /api/v1/exchanges/{id}/reject
///
/// Owner declines a pending request; the item goes back to `available`.
/// Publishes `exchange.rejected`.
pub async fn reject_exchange(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Exchange>>> {
    transition(
        &state,
        exchange_id,
        &user,
        Side::Owner,
        &[ExchangeStatus::Pending],
        ExchangeStatus::Rejected,
        Some(ItemStatus::Available),
        event_types::EXCHANGE_REJECTED,
    )
    .await
}

/// POST /api/v1/exchanges/{id}/cancel
///
/// Requester withdraws a pending or accepted exchange; the item goes back
/// to `available`. Publishes `exchange.cancelled`.
pub async fn cancel_exchange(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Exchange>>> {
    transition(
        &state,
        exchange_id,
        &user,
        Side::Requester,
        &[ExchangeStatus::Pending, ExchangeStatus::Accepted],
        ExchangeStatus::Cancelled,
        Some(ItemStatus::Available),
        event_types::EXCHANGE_CANCELLED,
    )
    .await
}

/// POST /api/v1/exchanges/{id}/complete
///
/// Owner marks the hand-over done; the item becomes `exchanged`.
/// Publishes `exchange.completed`.
pub async fn complete_exchange(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Exchange>>> {
    transition(
        &state,
        exchange_id,
        &user,
        Side::Owner,
        &[ExchangeStatus::Accepted, ExchangeStatus::InProgress],
        ExchangeStatus::Completed,
        Some(ItemStatus::Exchanged),
        event_types::EXCHANGE_COMPLETED,
    )
    .await
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Which participant is allowed to perform a transition.
enum Side {
    Owner,
    Requester,
}

/// Fetch an exchange and verify the caller participates in it.
async fn fetch_participant_exchange(
    state: &AppState,
    exchange_id: DbId,
    user_id: DbId,
) -> Result<Exchange, AppError> {
    let exchange = ExchangeRepo::find_by_id(&state.pool, exchange_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Exchange",
            id: exchange_id,
        }))?;
    if !exchange.is_participant(user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a participant in this exchange".into(),
        )));
    }
    Ok(exchange)
}

/// Shared transition logic for the accept/reject/cancel/complete endpoints.
#[allow(clippy::too_many_arguments)]
async fn transition(
    state: &AppState,
    exchange_id: DbId,
    user: &AuthUser,
    side: Side,
    allowed_from: &[ExchangeStatus],
    to: ExchangeStatus,
    item_status: Option<ItemStatus>,
    event_type: &'static str,
) -> AppResult<Json<DataResponse<Exchange>>> {
    let exchange = fetch_participant_exchange(state, exchange_id, user.user_id).await?;

    let acting_side_id = match side {
        Side::Owner => exchange.owner_id,
        Side::Requester => exchange.requester_id,
    };
    if user.user_id != acting_side_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot perform this action on the exchange".into(),
        )));
    }

    let current = ExchangeStatus::parse(&exchange.status).ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "Unknown exchange status in row {}: {}",
            exchange.id, exchange.status
        )))
    })?;
    if !allowed_from.contains(&current) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot move exchange from {} to {}",
            current.as_str(),
            to.as_str()
        ))));
    }

    let updated = ExchangeRepo::update_status(&state.pool, exchange.id, to.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Exchange",
            id: exchange.id,
        }))?;

    if let Some(status) = item_status {
        ItemRepo::set_status(&state.pool, updated.item_id, status.as_str()).await?;
    }

    state.event_bus.publish(
        PlatformEvent::new(event_type)
            .with_source("exchange", updated.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "exchange_id": updated.id,
                "item_id": updated.item_id,
                "owner_id": updated.owner_id,
                "requester_id": updated.requester_id,
            })),
    );

    Ok(Json(DataResponse { data: updated }))
}
