//! Domain services (session logic)

pub mod fetch_generation;
pub mod menu_filter;
pub mod menu_tree;
pub mod preferences;
pub mod session_store;
pub mod tab_reducer;

pub use fetch_generation::{FetchTicket, MenuScope, MenuTarget};
pub use menu_filter::MenuView;
pub use menu_tree::build_menu_tree;
pub use preferences::{PreferenceService, Preferences};
pub use session_store::{reduce, SessionAction, SessionEvent, SessionState, SessionStore};
pub use tab_reducer::{TabAction, TabState};
