use crate::types::FormId;

/// Domain error taxonomy.
///
/// There is deliberately no `Conflict` variant: concurrent updates are
/// last-write-wins with no version check, and the error surface reflects
/// that.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: FormId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The persistence gateway was unreachable or rejected the operation.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
