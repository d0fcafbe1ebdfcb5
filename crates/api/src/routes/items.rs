//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /          -> list_items   (public; ?category, ?status, ?posted_by)
/// POST   /          -> create_item
/// GET    /{id}      -> get_item     (public)
/// PUT    /{id}      -> update_item  (owner or admin)
/// DELETE /{id}      -> delete_item  (owner workflow)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
}
