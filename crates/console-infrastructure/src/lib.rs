//! # Console Infrastructure
//! 
//! Preference storage and backend HTTP implementations (adapters).

pub mod http;
pub mod storage;

pub use http::{ApiClient, HttpMenuSource};
pub use storage::{FilePreferenceStore, InMemoryPreferenceStore};
