//! Preference store trait (port)

use crate::error::DomainError;

/// String key/value storage for user-local preferences.
///
/// Mirrors the browser's local storage: synchronous, last write wins, values
/// are opaque strings (JSON-encoded by the caller where needed).
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
