//! Plain-text rendering of menu trees and the tab strip.

use std::fmt::Write;

use console_core::domain::MenuNode;
use console_core::services::TabState;

pub fn menu_tree(forest: &[MenuNode], favorites: &[u64]) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&MenuNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        write_line(&mut out, node, depth, favorites);
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
    out
}

fn write_line(out: &mut String, node: &MenuNode, depth: usize, favorites: &[u64]) {
    let entry = &node.entry;
    let marker = if favorites.contains(&entry.id) { " *" } else { "" };
    let _ = if entry.is_group() {
        writeln!(out, "{}[{}] {}{}", "  ".repeat(depth), entry.id, entry.display_name(), marker)
    } else {
        writeln!(
            out,
            "{}{} {} ({}){}",
            "  ".repeat(depth),
            entry.id,
            entry.display_name(),
            entry.path,
            marker
        )
    };
}

/// One line per tab, the active one prefixed with `>`.
pub fn tab_strip(tabs: &TabState) -> String {
    let mut out = String::new();
    for tab in &tabs.open_tabs {
        let active = if tabs.is_active(&tab.id) { ">" } else { " " };
        let pin = if tab.closable { "" } else { " (pinned)" };
        let _ = writeln!(out, "{} {} {}{}", active, tab.name, tab.path, pin);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::domain::{MenuEntry, Tab};
    use console_core::services::{build_menu_tree, TabAction};

    #[test]
    fn test_menu_tree_indents_children() {
        let forest = build_menu_tree(&[
            MenuEntry::new(1, "System", "").as_group(),
            MenuEntry::new(2, "Users", "/system/users").with_parent(1),
        ]);
        let text = menu_tree(&forest, &[2]);
        assert_eq!(text, "[1] System\n  2 Users (/system/users) *\n");
    }

    #[test]
    fn test_menu_tree_keeps_sibling_order() {
        let forest = build_menu_tree(&[
            MenuEntry::new(1, "A", "/a"),
            MenuEntry::new(2, "A1", "/a/1").with_parent(1),
            MenuEntry::new(3, "B", "/b").with_sort(1),
        ]);
        assert_eq!(menu_tree(&forest, &[]), "1 A (/a)\n  2 A1 (/a/1)\n3 B (/b)\n");
    }

    #[test]
    fn test_tab_strip_marks_active() {
        let state = TabState::default().reduce(&TabAction::Open(Tab::new("5", "Users", "/users")));
        let text = tab_strip(&state);
        assert_eq!(text, "  Dashboard /dashboard (pinned)\n> Users /users\n");
    }
}
