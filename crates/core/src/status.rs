//! Item and exchange lifecycle status enumerations.
//!
//! Statuses are persisted as lowercase snake_case TEXT; the repository
//! layer stores the raw string and the domain layer parses it on demand.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a posted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Listed and open for exchange requests.
    Available,
    /// Tied up in an accepted or requested exchange.
    Pending,
    /// Handed over; the listing is closed.
    Exchanged,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Pending => "pending",
            ItemStatus::Exchanged => "exchanged",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(ItemStatus::Available),
            "pending" => Some(ItemStatus::Pending),
            "exchanged" => Some(ItemStatus::Exchanged),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ExchangeStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an exchange relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

/// Status strings that make an exchange *active*, i.e. block deletion of
/// the referenced item. Kept as raw strings so the repository layer can
/// bind them directly in `status = ANY(...)` queries.
pub const ACTIVE_EXCHANGE_STATUSES: &[&str] = &["pending", "accepted", "in_progress"];

impl ExchangeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExchangeStatus::Pending => "pending",
            ExchangeStatus::Accepted => "accepted",
            ExchangeStatus::InProgress => "in_progress",
            ExchangeStatus::Completed => "completed",
            ExchangeStatus::Cancelled => "cancelled",
            ExchangeStatus::Rejected => "rejected",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ExchangeStatus::Pending),
            "accepted" => Some(ExchangeStatus::Accepted),
            "in_progress" => Some(ExchangeStatus::InProgress),
            "completed" => Some(ExchangeStatus::Completed),
            "cancelled" => Some(ExchangeStatus::Cancelled),
            "rejected" => Some(ExchangeStatus::Rejected),
            _ => None,
        }
    }

    /// An active exchange blocks deletion of its item.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ExchangeStatus::Pending | ExchangeStatus::Accepted | ExchangeStatus::InProgress
        )
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_statuses_block_deletion() {
        assert!(ExchangeStatus::Pending.is_active());
        assert!(ExchangeStatus::Accepted.is_active());
        assert!(ExchangeStatus::InProgress.is_active());
    }

    #[test]
    fn terminal_statuses_do_not_block_deletion() {
        assert!(!ExchangeStatus::Completed.is_active());
        assert!(!ExchangeStatus::Cancelled.is_active());
        assert!(!ExchangeStatus::Rejected.is_active());
    }

    #[test]
    fn active_status_strings_match_enum() {
        for s in ACTIVE_EXCHANGE_STATUSES {
            let parsed = ExchangeStatus::parse(s).expect("known status");
            assert!(parsed.is_active(), "{s} should be active");
        }
    }

    #[test]
    fn item_status_round_trips() {
        for status in [
            ItemStatus::Available,
            ItemStatus::Pending,
            ItemStatus::Exchanged,
        ] {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn exchange_status_round_trips() {
        for status in [
            ExchangeStatus::Pending,
            ExchangeStatus::Accepted,
            ExchangeStatus::InProgress,
            ExchangeStatus::Completed,
            ExchangeStatus::Cancelled,
            ExchangeStatus::Rejected,
        ] {
            assert_eq!(ExchangeStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_strings_parse_to_none() {
        assert_eq!(ItemStatus::parse("deleted"), None);
        assert_eq!(ExchangeStatus::parse("PENDING"), None);
        assert_eq!(ExchangeStatus::parse(""), None);
    }
}
