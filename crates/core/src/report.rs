//! Report filing rules.
//!
//! A report targets an item, a user, or both, and carries a category from
//! a fixed set plus free-text details. Validation runs before any row is
//! written so a malformed report never reaches the database.

use crate::error::CoreError;
use crate::types::DbId;

/// Accepted report categories.
pub const CATEGORIES: &[&str] = &[
    "spam",
    "scam",
    "inappropriate",
    "counterfeit",
    "harassment",
    "other",
];

/// Maximum length of the free-text details field.
pub const MAX_DETAILS_LEN: usize = 1000;

/// Report lifecycle statuses.
pub mod statuses {
    pub const OPEN: &str = "open";
    pub const RESOLVED: &str = "resolved";
    pub const DISMISSED: &str = "dismissed";
}

/// Validate a new report before insertion.
///
/// Rules:
/// - category must be one of [`CATEGORIES`]
/// - details must be non-empty after trimming and at most
///   [`MAX_DETAILS_LEN`] characters
/// - at least one of `reported_user_id` / `item_id` must be present
/// - users cannot report themselves
pub fn validate_new_report(
    reporter_id: DbId,
    reported_user_id: Option<DbId>,
    item_id: Option<DbId>,
    category: &str,
    details: &str,
) -> Result<(), CoreError> {
    if !CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "Unknown report category: {category}"
        )));
    }

    let trimmed = details.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Report details must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_DETAILS_LEN {
        return Err(CoreError::Validation(format!(
            "Report details must be at most {MAX_DETAILS_LEN} characters"
        )));
    }

    if reported_user_id.is_none() && item_id.is_none() {
        return Err(CoreError::Validation(
            "Report must reference an item or a user".into(),
        ));
    }

    if reported_user_id == Some(reporter_id) {
        return Err(CoreError::Validation("You cannot report yourself".into()));
    }

    Ok(())
}

/// Check whether `status` is a valid resolution outcome for a report.
pub fn is_resolution_status(status: &str) -> bool {
    status == statuses::RESOLVED || status == statuses::DISMISSED
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn valid_item_report_passes() {
        assert!(validate_new_report(1, None, Some(7), "spam", "posting the same ad daily").is_ok());
    }

    #[test]
    fn valid_user_report_passes() {
        assert!(validate_new_report(1, Some(2), None, "harassment", "abusive messages").is_ok());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = validate_new_report(1, Some(2), None, "rude", "details").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn blank_details_are_rejected() {
        let err = validate_new_report(1, Some(2), None, "spam", "   ").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn overlong_details_are_rejected() {
        let details = "x".repeat(MAX_DETAILS_LEN + 1);
        let err = validate_new_report(1, Some(2), None, "spam", &details).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn report_without_target_is_rejected() {
        let err = validate_new_report(1, None, None, "spam", "details").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn self_report_is_rejected() {
        let err = validate_new_report(5, Some(5), None, "other", "details").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn resolution_statuses() {
        assert!(is_resolution_status(statuses::RESOLVED));
        assert!(is_resolution_status(statuses::DISMISSED));
        assert!(!is_resolution_status(statuses::OPEN));
        assert!(!is_resolution_status("closed"));
    }
}
