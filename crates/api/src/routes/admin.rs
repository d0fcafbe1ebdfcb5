//! Route definitions for the `/admin` moderation surface.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
///
/// ```text
/// GET    /users                  -> list_users
/// POST   /users/{id}/ban         -> ban_user
/// POST   /users/{id}/unban       -> unban_user
/// GET    /reports                -> list_reports  (?status)
/// POST   /reports/{id}/resolve   -> resolve_report
/// DELETE /items/{id}             -> remove_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/ban", post(admin::ban_user))
        .route("/users/{id}/unban", post(admin::unban_user))
        .route("/reports", get(admin::list_reports))
        .route("/reports/{id}/resolve", post(admin::resolve_report))
        .route("/items/{id}", delete(admin::remove_item))
}
