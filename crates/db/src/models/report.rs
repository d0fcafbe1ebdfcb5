//! Report entity model and DTOs.

use exchange_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub reporter_id: DbId,
    pub reported_user_id: Option<DbId>,
    pub item_id: Option<DbId>,
    pub category: String,
    pub details: String,
    pub status: String,
    pub resolution_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    pub reported_user_id: Option<DbId>,
    pub item_id: Option<DbId>,
    pub category: String,
    pub details: String,
}

/// DTO for resolving a report (admin).
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveReport {
    /// `resolved` or `dismissed`.
    pub status: String,
    pub resolution_note: Option<String>,
}
