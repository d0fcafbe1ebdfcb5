//! Handlers for the `/notifications` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use exchange_core::error::CoreError;
use exchange_core::pagination::{clamp_limit, clamp_offset};
use exchange_core::types::DbId;
use exchange_db::models::notification::Notification;
use exchange_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the notification listing endpoint.
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<NotificationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "unread_count": count } })))
}

/// POST /api/v1/notifications/{id}/read
///
/// 404 when the notification does not exist, belongs to someone else, or
/// is already read.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(notification_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = NotificationRepo::mark_read(&state.pool, notification_id, user.user_id).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }
    Ok(Json(serde_json::json!({ "data": { "read": true } })))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "marked_read": count } })))
}
