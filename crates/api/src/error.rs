use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use exchange_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `exchange_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = status_for(&self);

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an error to its HTTP status, machine-readable code, and client
/// message. Unexpected kinds are logged here and sanitised to a generic
/// message so no internal detail crosses the boundary.
fn status_for(err: &AppError) -> (StatusCode, &'static str, String) {
    match err {
        // --- CoreError variants ---
        AppError::Core(core) => match core {
            CoreError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} not found"),
            ),
            CoreError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", format!("Forbidden: {msg}"))
            }
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            CoreError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            CoreError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        },

        // --- Database errors ---
        AppError::Database(err) => classify_sqlx_error(err),

        // --- HTTP-specific errors ---
        AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        AppError::InternalError(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        status_for(&err).0
    }

    #[test]
    fn domain_errors_map_to_their_declared_statuses() {
        assert_eq!(
            status_of(AppError::Core(CoreError::NotFound {
                entity: "Item",
                id: 1
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Forbidden("nope".into()))),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Conflict("busy".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Validation("bad".into()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Core(CoreError::Unauthorized("who".into()))),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn unexpected_errors_are_sanitised_to_500() {
        let (status, _, message) =
            status_for(&AppError::Core(CoreError::Internal("pool exhausted".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "An internal error occurred");

        let (status, _, message) =
            status_for(&AppError::InternalError("stack trace here".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("stack trace"));
    }

    #[test]
    fn ownership_failure_renders_with_forbidden_prefix() {
        let (_, _, message) =
            status_for(&AppError::Core(CoreError::Forbidden("You do not own this item".into())));
        assert_eq!(message, "Forbidden: You do not own this item");
    }

    #[test]
    fn missing_item_renders_without_the_row_id() {
        let (_, _, message) = status_for(&AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: 42,
        }));
        assert_eq!(message, "Item not found");
    }

    #[test]
    fn conflict_messages_pass_through_verbatim() {
        let (_, _, message) = status_for(&AppError::Core(CoreError::Conflict(
            "Cannot delete item with active exchange".into(),
        )));
        assert_eq!(message, "Cannot delete item with active exchange");
    }
}
