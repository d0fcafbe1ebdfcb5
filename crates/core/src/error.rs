use crate::types::DbId;

/// Domain error taxonomy.
///
/// The first three variants (`NotFound`, `Forbidden`, `Conflict`) are the
/// closed set of expected failures produced by business rules; the boundary
/// layer maps them to 404/403/409 with their message intact. `Validation`
/// and `Unauthorized` cover request-shape and credential problems.
/// `Internal` is the catch-all for infrastructure failures and is never
/// shown to clients verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
