use crate::storage::StorageError;

/// Everything a service operation can reject a request with.
///
/// The REST layer maps each variant to exactly one status code; no variant is
/// fatal to the process and none leaves the stores partially updated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Missing or invalid input field
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("{0}")]
    Conflict(String),

    /// If-Unmodified-Since did not match the last known modification
    #[error("{entity} {id} was modified since the supplied timestamp")]
    PreconditionFailed { entity: &'static str, id: u64 },

    /// If-Modified-Since matched the last known modification
    #[error("not modified")]
    NotModified,
}

impl DomainError {
    pub fn missing(field: &str) -> Self {
        DomainError::Validation(format!("Missing {}", field))
    }

    pub fn bath_not_found(id: u64) -> Self {
        DomainError::NotFound { entity: "bath", id }
    }

    pub fn client_not_found(id: u64) -> Self {
        DomainError::NotFound { entity: "client", id }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEmail(_) => DomainError::Conflict(err.to_string()),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
