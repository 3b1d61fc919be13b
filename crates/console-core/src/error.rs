//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown menu view: {0}")]
    UnknownMenuView(String),

    #[error("Menu not found: {0}")]
    MenuNotFound(u64),

    #[error("Tab is not closable: {0}")]
    TabNotClosable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
