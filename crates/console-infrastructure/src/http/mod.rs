//! Backend REST adapters

pub mod client;
pub mod menu_api;

pub use client::ApiClient;
pub use menu_api::{extract_menus, HttpMenuSource};
