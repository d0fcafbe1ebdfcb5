pub mod admin;
pub mod exchanges;
pub mod health;
pub mod items;
pub mod notifications;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items                               list (public), create
/// /items/{id}                          get (public), update, delete
///
/// /exchanges                           list, request
/// /exchanges/{id}                      get (participant)
/// /exchanges/{id}/accept               owner: pending -> accepted
/// /exchanges/{id}/reject               owner: pending -> rejected
/// /exchanges/{id}/cancel               requester: pending|accepted -> cancelled
/// /exchanges/{id}/complete             owner: accepted|in_progress -> completed
/// /exchanges/{id}/messages             list, send (participants only)
///
/// /reports                             file a report
/// /reports/mine                        reporter's own reports
///
/// /notifications                       list (?unread_only, limit, offset)
/// /notifications/unread-count          unread count (GET)
/// /notifications/read-all              mark all read (POST)
/// /notifications/{id}/read             mark read (POST)
///
/// /admin/users                         list (admin only)
/// /admin/users/{id}/ban                ban (POST)
/// /admin/users/{id}/unban              unban (POST)
/// /admin/reports                       all reports (?status)
/// /admin/reports/{id}/resolve          resolve or dismiss (POST)
/// /admin/items/{id}                    moderation removal (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/items", items::router())
        // Exchange lifecycle plus the per-exchange chat.
        .nest("/exchanges", exchanges::router())
        .nest("/reports", reports::router())
        .nest("/notifications", notifications::router())
        // Moderation surface (admin role enforced per handler).
        .nest("/admin", admin::router())
}
