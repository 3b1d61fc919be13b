//! # Console Core
//! 
//! Domain entities, services, and port traits for the admin console session:
//! open tabs, the authorised menu tree, and user-local preferences.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
