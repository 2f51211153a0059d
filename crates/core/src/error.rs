//! Domain error types shared by all services.

use fintrack_shared::{AppError, FieldErrors};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using `FinanceError`.
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Errors that can occur in finance operations.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// The record does not exist or belongs to another user.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"Category"`.
        entity: &'static str,
        /// Requested identifier.
        id: Uuid,
    },

    /// Field-scoped validation failure; nothing was written.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The write would break referential or uniqueness integrity.
    #[error("{0}")]
    Conflict(String),

    /// The underlying store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinanceError {
    /// Creates a `NotFound` error for `entity`.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates a validation error with a single field message.
    #[must_use]
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<FieldErrors> for FinanceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<FinanceError> for AppError {
    fn from(error: FinanceError) -> Self {
        match error {
            FinanceError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            FinanceError::Validation(errors) => Self::Validation(errors),
            FinanceError::Conflict(message) => Self::Conflict(message),
            FinanceError::Storage(message) => Self::Database(message),
        }
    }
}
