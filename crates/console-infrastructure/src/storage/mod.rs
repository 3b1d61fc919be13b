//! Preference storage adapters

pub mod file;
pub mod memory;

pub use file::FilePreferenceStore;
pub use memory::InMemoryPreferenceStore;
