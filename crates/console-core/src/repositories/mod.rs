//! Port traits implemented by the infrastructure adapters

pub mod preference_store;
pub mod menu_source;

pub use preference_store::PreferenceStore;
pub use menu_source::MenuSource;

#[cfg(test)]
pub use menu_source::MockMenuSource;
