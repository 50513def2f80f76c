use crate::types::DbId;

/// Opaque infrastructure failure carried through [`CoreError::Storage`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used by value objects, repositories and use cases.
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid reference: {entity} with id {id} does not exist")]
    InvalidReference { entity: &'static str, id: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Storage error: {0}")]
    Storage(#[source] BoxError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a backend failure without inspecting it.
    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }

    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Shorthand for [`CoreError::InvalidReference`].
    pub fn invalid_reference(entity: &'static str, id: impl Into<String>) -> Self {
        Self::InvalidReference {
            entity,
            id: id.into(),
        }
    }
}
