// ============================================================================
// Console Core - Menu Entry Entity
// File: crates/console-core/src/domain/menu.rs
// Description: Authorised navigation entries and the computed menu tree
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};

pub type MenuId = u64;

/// Explicit `null` reads as the default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Menu entry kind. Groups only expand in the sidebar; items open tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuType {
    Group,
    #[default]
    Item,
}

impl MenuType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::Group => "group",
            MenuType::Item => "menu",
        }
    }
}

impl From<String> for MenuType {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("group") {
            MenuType::Group
        } else {
            MenuType::Item
        }
    }
}

impl From<MenuType> for String {
    fn from(t: MenuType) -> Self {
        t.as_str().to_string()
    }
}

/// Menu entry as served by the backend (`/menu/*`, `/permissions/*`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuEntry {
    pub id: MenuId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub component: String,

    /// `None` and `Some(0)` both mean root.
    pub parent_id: Option<MenuId>,

    #[serde(alias = "sort_order", deserialize_with = "null_as_default")]
    pub sort: i32,

    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub menu_type: MenuType,

    #[serde(deserialize_with = "null_as_default")]
    pub hidden: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub level: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: i32,
}

impl MenuEntry {
    pub fn new(id: MenuId, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: MenuId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_sort(mut self, sort: i32) -> Self {
        self.sort = sort;
        self
    }

    pub fn as_group(mut self) -> Self {
        self.menu_type = MenuType::Group;
        self
    }

    pub fn parent(&self) -> Option<MenuId> {
        self.parent_id.filter(|id| *id != 0)
    }

    pub fn is_group(&self) -> bool {
        self.menu_type == MenuType::Group
    }

    /// `name`, falling back to `title`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.title
        } else {
            &self.name
        }
    }
}

/// Menu entry with its computed children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub entry: MenuEntry,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn leaf(entry: MenuEntry) -> Self {
        Self {
            entry,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> MenuId {
        self.entry.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

// Flattens the subtree before dropping so deep chains do not recurse.
impl Drop for MenuNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": 7, "created_at": "2024-01-01T00:00:00Z",
            "name": "", "title": "User Management", "path": "/user",
            "icon": "user", "parent_id": 0, "sort": 3, "type": "group",
            "status": 1
        }"#;
        let menu: MenuEntry = serde_json::from_str(json).unwrap();
        assert_eq!(menu.id, 7);
        assert_eq!(menu.parent(), None);
        assert_eq!(menu.sort, 3);
        assert!(menu.is_group());
        assert_eq!(menu.display_name(), "User Management");
    }

    #[test]
    fn test_missing_fields_default() {
        let menu: MenuEntry = serde_json::from_str(r#"{"id": 2, "parent_id": null}"#).unwrap();
        assert_eq!(menu.menu_type, MenuType::Item);
        assert_eq!(menu.parent(), None);
        assert_eq!(menu.sort, 0);
    }

    #[test]
    fn test_explicit_nulls_default() {
        let json = r#"{"id": 4, "name": null, "title": "Logs", "path": null,
            "type": null, "sort": null, "hidden": null, "icon": null}"#;
        let menu: MenuEntry = serde_json::from_str(json).unwrap();
        assert_eq!(menu.display_name(), "Logs");
        assert_eq!(menu.path, "");
        assert_eq!(menu.menu_type, MenuType::Item);
        assert_eq!(menu.sort, 0);
        assert!(!menu.hidden);
    }

    #[test]
    fn test_unknown_type_is_item() {
        let menu: MenuEntry = serde_json::from_str(r#"{"id": 2, "type": "page"}"#).unwrap();
        assert_eq!(menu.menu_type, MenuType::Item);
    }

    #[test]
    fn test_node_serializes_flat() {
        let node = MenuNode::leaf(MenuEntry::new(1, "A", "/a").with_parent(4));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["parent_id"], 4);
        assert_eq!(value["type"], "menu");
        assert!(value["children"].as_array().unwrap().is_empty());
    }
}
