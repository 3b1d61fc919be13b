//! Application-wide constants

/// Preference keys, shared with the browser console's local storage layout.
pub const STORAGE_KEY_FAVORITES: &str = "favoriteMenus";
pub const STORAGE_KEY_RECENTS: &str = "recentMenus";
pub const STORAGE_KEY_WATERMARK: &str = "watermarkSettings";
pub const STORAGE_KEY_THEME: &str = "theme";

pub const RECENT_MENU_CAPACITY: usize = 10;

pub const DASHBOARD_TAB_ID: &str = "dashboard";
pub const DASHBOARD_TAB_NAME: &str = "Dashboard";
pub const DASHBOARD_TAB_PATH: &str = "/dashboard";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_STORAGE_PATH: &str = ".console/preferences.json";
