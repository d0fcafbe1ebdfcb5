//! Exchange entity model and DTOs.

use exchange_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `exchanges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exchange {
    pub id: DbId,
    pub item_id: DbId,
    pub owner_id: DbId,
    pub requester_id: DbId,
    pub status: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Exchange {
    /// Whether `user_id` is the owner or the requester.
    pub fn is_participant(&self, user_id: DbId) -> bool {
        self.owner_id == user_id || self.requester_id == user_id
    }

    /// The participant on the other side of the exchange from `user_id`.
    pub fn counterpart(&self, user_id: DbId) -> DbId {
        if self.owner_id == user_id {
            self.requester_id
        } else {
            self.owner_id
        }
    }
}

/// DTO for requesting an exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExchange {
    pub item_id: DbId,
    pub message: Option<String>,
}
