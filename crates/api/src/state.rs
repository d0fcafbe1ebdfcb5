use std::sync::Arc;

use exchange_events::EventBus;
use exchange_media::MediaClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: exchange_db::DbPool,
    /// Server configuration (JWT secret, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// Cloudinary admin-API client for image cleanup.
    pub media: Arc<MediaClient>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<EventBus>,
}
