//! Chat message rules.

use crate::error::CoreError;

/// Maximum length of a chat message body.
pub const MAX_BODY_LEN: usize = 1000;

/// Validate a chat message body: non-empty after trimming, at most
/// [`MAX_BODY_LEN`] characters.
pub fn validate_message_body(body: &str) -> Result<(), CoreError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Message must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_BODY_LEN {
        return Err(CoreError::Validation(format!(
            "Message must be at most {MAX_BODY_LEN} characters"
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
    fn normal_body_passes() {
        assert!(validate_message_body("Is this still available?").is_ok());
    }

    #[test]
    fn blank_body_is_rejected() {
        let err = validate_message_body("   ").unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn overlong_body_is_rejected() {
        let body = "x".repeat(MAX_BODY_LEN + 1);
        let err = validate_message_body(&body).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }
}
