//! Chat message entity model and DTO.

use exchange_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messages` table. Chat is scoped to an exchange between
/// its two participants.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub exchange_id: DbId,
    pub sender_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for sending a message.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessage {
    pub body: String,
}
