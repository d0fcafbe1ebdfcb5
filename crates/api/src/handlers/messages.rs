//! Handlers for exchange-scoped chat messages.
//!
//! Chat is private to the two participants of an exchange; both endpoints
//! verify participation before touching the conversation.

use axum::extract::{Path, Query, State};
use axum::Json;
use exchange_core::chat::validate_message_body;
use exchange_core::error::CoreError;
use exchange_core::pagination::{clamp_limit, clamp_offset};
use exchange_core::types::DbId;
use exchange_db::models::message::{CreateMessage, Message};
use exchange_db::repositories::{ExchangeRepo, MessageRepo};
use exchange_events::{event_types, PlatformEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/exchanges/{id}/messages
///
/// Chronological message history, participant-only.
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    require_participant(&state, exchange_id, user.user_id).await?;

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let messages = MessageRepo::list_for_exchange(&state.pool, exchange_id, limit, offset).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/exchanges/{id}/messages
///
/// Append a message; publishes `message.sent` so the other participant is
/// notified.
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exchange_id): Path<DbId>,
    Json(input): Json<CreateMessage>,
) -> AppResult<Json<DataResponse<Message>>> {
    validate_message_body(&input.body)?;

    let exchange = require_participant(&state, exchange_id, user.user_id).await?;
    let message =
        MessageRepo::create(&state.pool, exchange_id, user.user_id, input.body.trim()).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::MESSAGE_SENT)
            .with_source("message", message.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "exchange_id": exchange_id,
                "message_id": message.id,
                "sender_id": user.user_id,
                "recipient_id": exchange.counterpart(user.user_id),
            })),
    );

    Ok(Json(DataResponse { data: message }))
}

// ── Private helpers ──────────────────────────────────────────────────────

async fn require_participant(
    state: &AppState,
    exchange_id: DbId,
    user_id: DbId,
) -> Result<exchange_db::models::exchange::Exchange, AppError> {
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
