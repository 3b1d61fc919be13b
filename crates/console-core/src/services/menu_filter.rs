//! Presentation-level menu filtering: search text and favorites/recents views.

use std::fmt;
use std::str::FromStr;

use console_shared::utils::contains_ignore_case;

use crate::domain::{MenuEntry, MenuId, MenuNode};
use crate::error::DomainError;

/// Sidebar view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuView {
    #[default]
    All,
    Favorites,
    Recents,
}

impl FromStr for MenuView {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(MenuView::All),
            "favorites" => Ok(MenuView::Favorites),
            "recent" | "recents" => Ok(MenuView::Recents),
            other => Err(DomainError::UnknownMenuView(other.to_string())),
        }
    }
}

impl fmt::Display for MenuView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuView::All => "all",
            MenuView::Favorites => "favorites",
            MenuView::Recents => "recents",
        })
    }
}

/// Case-insensitive substring match on name, title or path. Empty text keeps everything.
pub fn matches_search(menu: &MenuEntry, search: &str) -> bool {
    search.is_empty()
        || contains_ignore_case(&menu.name, search)
        || contains_ignore_case(&menu.title, search)
        || contains_ignore_case(&menu.path, search)
}

/// The search text is matched as typed, surrounding whitespace included.
pub fn filter_menus(menus: &[MenuEntry], search: &str) -> Vec<MenuEntry> {
    menus
        .iter()
        .filter(|m| matches_search(m, search))
        .cloned()
        .collect()
}

/// Keeps a root when it, or one of its direct children, is in `ids`.
pub fn retain_roots_in(forest: Vec<MenuNode>, ids: &[MenuId]) -> Vec<MenuNode> {
    forest
        .into_iter()
        .filter(|root| {
            ids.contains(&root.id()) || root.children.iter().any(|c| ids.contains(&c.id()))
        })
        .collect()
}

pub fn apply_view(
    forest: Vec<MenuNode>,
    view: MenuView,
    favorites: &[MenuId],
    recents: &[MenuId],
) -> Vec<MenuNode> {
    match view {
        MenuView::All => forest,
        MenuView::Favorites => retain_roots_in(forest, favorites),
        MenuView::Recents => retain_roots_in(forest, recents),
    }
}
