//! Item listing rules.
//!
//! Validation runs before any row is written, so a malformed listing never
//! reaches the database.

use crate::error::CoreError;

/// Accepted item categories.
pub const CATEGORIES: &[&str] = &[
    "books",
    "electronics",
    "clothing",
    "furniture",
    "stationery",
    "sports",
    "other",
];

/// Maximum length of an item title.
pub const MAX_TITLE_LEN: usize = 120;

/// Maximum length of an item description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Validate a new item listing.
///
/// Rules:
/// - title must be non-empty after trimming and at most
///   [`MAX_TITLE_LEN`] characters
/// - description, when present, at most [`MAX_DESCRIPTION_LEN`] characters
/// - category must be one of [`CATEGORIES`]
pub fn validate_new_item(
    title: &str,
    description: Option<&str>,
    category: &str,
) -> Result<(), CoreError> {
    validate_title(title)?;
    if let Some(desc) = description {
        validate_description(desc)?;
    }
    validate_category(category)?;
    Ok(())
}

/// Validate the fields present in a partial item update.
pub fn validate_item_update(
    title: Option<&str>,
    description: Option<&str>,
    category: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(t) = title {
        validate_title(t)?;
    }
    if let Some(desc) = description {
        validate_description(desc)?;
    }
    if let Some(c) = category {
        validate_category(c)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Item title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Item title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Item description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), CoreError> {
    if !CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "Unknown item category: {category}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn valid_item_passes() {
        assert!(validate_new_item("Calculus textbook", Some("3rd edition"), "books").is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = validate_new_item("  ", None, "books").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        let err = validate_new_item(&title, None, "books").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = validate_new_item("Desk lamp", None, "lighting").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let desc = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let err = validate_new_item("Desk lamp", Some(&desc), "other").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn partial_update_validates_only_present_fields() {
        assert!(validate_item_update(None, None, None).is_ok());
        assert!(validate_item_update(Some("New title"), None, None).is_ok());
        let err = validate_item_update(None, None, Some("nope")).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
