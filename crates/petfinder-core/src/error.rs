//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Pet not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl DomainError {
    /// Stable machine-readable code, used by the API and in logs.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::Persistence(_) => "PERSISTENCE_ERROR",
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::Storage(_) => "STORAGE_ERROR",
            DomainError::Encoding(_) => "ENCODING_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(errors.to_string())
    }
}
