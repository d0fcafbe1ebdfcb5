//! Handlers for the `/reports` resource (member-facing).

use axum::extract::{Query, State};
use axum::Json;
use exchange_core::pagination::{clamp_limit, clamp_offset};
use exchange_core::report::validate_new_report;
use exchange_db::models::report::{CreateReport, Report};
use exchange_db::repositories::ReportRepo;
use exchange_events::{event_types, PlatformEvent};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/reports
///
/// File a report against an item, a user, or both. Publishes
/// `report.filed`.
pub async fn create_report(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateReport>,
) -> AppResult<Json<DataResponse<Report>>> {
    validate_new_report(
        user.user_id,
        input.reported_user_id,
        input.item_id,
        &input.category,
        &input.details,
    )?;

    let report = ReportRepo::create(&state.pool, user.user_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(event_types::REPORT_FILED)
            .with_source("report", report.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "report_id": report.id,
                "category": report.category,
            })),
    );

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/mine
///
/// The caller's own reports, newest first.
pub async fn list_my_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let reports = ReportRepo::list_for_reporter(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: reports }))
}
