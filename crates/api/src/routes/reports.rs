//! Route definitions for the `/reports` resource (member-facing).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST /         -> create_report
/// GET  /mine     -> list_my_reports
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reports::create_report))
        .route("/mine", get(reports::list_my_reports))
}
