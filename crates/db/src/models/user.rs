//! User entity model.
//!
//! Account provisioning and credential management live in the external
//! identity service; this table only mirrors what the backend needs for
//! ownership checks, moderation, and notification targeting.

use exchange_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub is_banned: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a user record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
    pub role: Option<String>,
}
