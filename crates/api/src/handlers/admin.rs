//! Handlers for the `/admin` moderation surface. All require the `admin`
//! role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::Json;
use exchange_core::error::CoreError;
use exchange_core::media::collect_item_image_ids;
use exchange_core::pagination::{clamp_limit, clamp_offset};
use exchange_core::report::is_resolution_status;
use exchange_core::types::DbId;
use exchange_db::models::report::{Report, ResolveReport};
use exchange_db::models::user::User;
use exchange_db::repositories::{ItemRepo, ReportRepo, UserRepo};
use exchange_events::{event_types, PlatformEvent};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users/{id}/ban
pub async fn ban_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    set_banned(&state, user_id, true).await
}

/// POST /api/v1/admin/users/{id}/unban
pub async fn unban_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    set_banned(&state, user_id, false).await
}

/// Query parameters for the admin report listing.
#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/reports
pub async fn list_reports(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ReportListQuery>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let reports = ReportRepo::list(&state.pool, params.status.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// POST /api/v1/admin/reports/{id}/resolve
///
/// Close an open report as `resolved` or `dismissed`. 409 when the report
/// was already closed. Publishes `report.resolved`.
pub async fn resolve_report(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(report_id): Path<DbId>,
    Json(input): Json<ResolveReport>,
) -> AppResult<Json<DataResponse<Report>>> {
    if !is_resolution_status(&input.status) {
        return Err(AppError::BadRequest(format!(
            "Invalid resolution status: {}",
            input.status
        )));
    }

    // The UPDATE only matches open reports, so distinguish missing from
    // already-closed for the error response.
    let resolved = ReportRepo::resolve(
        &state.pool,
        report_id,
        &input.status,
        input.resolution_note.as_deref(),
    )
    .await?;

    let report = match resolved {
        Some(report) => report,
        None => {
            return match ReportRepo::find_by_id(&state.pool, report_id).await? {
                Some(_) => Err(AppError::Core(CoreError::Conflict(
                    "Report is already closed".into(),
                ))),
                None => Err(AppError::Core(CoreError::NotFound {
                    entity: "Report",
                    id: report_id,
                })),
            };
        }
    };

    state.event_bus.publish(
        PlatformEvent::new(event_types::REPORT_RESOLVED)
            .with_source("report", report.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "report_id": report.id,
                "status": report.status,
                "reporter_id": report.reporter_id,
            })),
    );

    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/v1/admin/items/{id}
///
/// Moderation removal. Same cleanup-then-delete shape as the owner
/// workflow but skips the ownership and active-exchange guards; the item
/// owner is notified via `item.removed_by_admin`.
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }))?;

    let public_ids = collect_item_image_ids(Some(&item.image_urls), item.image_url.as_deref());
    if !public_ids.is_empty() {
        if let Err(e) = state.media.delete_images(&public_ids).await {
            tracing::warn!(
                error = %e,
                item_id,
                "Hosted image cleanup failed during admin removal, continuing"
            );
        }
    }

    ItemRepo::delete(&state.pool, item_id).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::ITEM_REMOVED_BY_ADMIN)
            .with_source("item", item.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "item_id": item.id,
                "owner_id": item.posted_by,
                "title": item.title,
            })),
    );

    Ok(Json(serde_json::json!({ "data": { "deleted": true } })))
}

// ── Private helpers ──────────────────────────────────────────────────────

async fn set_banned(
    state: &AppState,
    user_id: DbId,
    banned: bool,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::set_banned(&state.pool, user_id, banned)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}
