//! Tab entity

use console_shared::constants::{DASHBOARD_TAB_ID, DASHBOARD_TAB_NAME, DASHBOARD_TAB_PATH};
use serde::{Deserialize, Serialize};

use super::menu::MenuEntry;

/// An open navigational tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    pub path: String,
    pub closable: bool,
}

impl Tab {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            closable: true,
        }
    }

    /// The pinned home tab every session starts with.
    pub fn dashboard() -> Self {
        Self {
            id: DASHBOARD_TAB_ID.to_string(),
            name: DASHBOARD_TAB_NAME.to_string(),
            path: DASHBOARD_TAB_PATH.to_string(),
            closable: false,
        }
    }

    /// Groups never become tabs.
    pub fn from_menu(menu: &MenuEntry) -> Option<Self> {
        if menu.is_group() {
            return None;
        }
        Some(Self::new(menu.id.to_string(), menu.display_name(), menu.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_is_pinned() {
        let tab = Tab::dashboard();
        assert_eq!(tab.id, "dashboard");
        assert!(!tab.closable);
    }

    #[test]
    fn test_from_menu() {
        let mut menu = MenuEntry::new(12, "", "/roles");
        menu.title = "Roles".to_string();
        let tab = Tab::from_menu(&menu).unwrap();
        assert_eq!(tab.id, "12");
        assert_eq!(tab.name, "Roles");
        assert!(tab.closable);

        assert!(Tab::from_menu(&MenuEntry::new(1, "System", "").as_group()).is_none());
    }
}
