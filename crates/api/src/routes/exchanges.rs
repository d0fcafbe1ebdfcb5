//! Route definitions for the `/exchanges` resource, including the
//! per-exchange chat.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{exchanges, messages};
use crate::state::AppState;

/// Routes mounted at `/exchanges`.
///
/// ```text
/// GET  /                   -> list_exchanges   (?role, ?status)
/// POST /                   -> request_exchange
/// GET  /{id}               -> get_exchange
/// POST /{id}/accept        -> accept_exchange
/// POST /{id}/reject        -> reject_exchange
/// POST /{id}/cancel        -> cancel_exchange
/// POST /{id}/complete      -> complete_exchange
/// GET  /{id}/messages      -> list_messages
/// POST /{id}/messages      -> send_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(exchanges::list_exchanges).post(exchanges::request_exchange),
        )
        .route("/{id}", get(exchanges::get_exchange))
        .route("/{id}/accept", post(exchanges::accept_exchange))
        .route("/{id}/reject", post(exchanges::reject_exchange))
        .route("/{id}/cancel", post(exchanges::cancel_exchange))
        .route("/{id}/complete", post(exchanges::complete_exchange))
        .route(
            "/{id}/messages",
            get(messages::list_messages).post(messages::send_message),
        )
}
