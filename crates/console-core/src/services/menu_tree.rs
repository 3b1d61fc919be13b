//! Builds the sidebar forest from the flat, parent-pointer menu list.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{MenuEntry, MenuId, MenuNode};

/// Two-pass, map-based construction.
///
/// 1. index every entry by id (first occurrence wins)
/// 2. attach each entry to its parent if the parent is present, else make it a root
///
/// Roots and each children list are stably sorted by `sort`. Entries whose
/// parent chain loops never reach a root and are left out.
pub fn build_menu_tree(entries: &[MenuEntry]) -> Vec<MenuNode> {
    let mut index: HashMap<MenuId, usize> = HashMap::with_capacity(entries.len());
    let mut kept: Vec<&MenuEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        if index.contains_key(&entry.id) {
            warn!("Duplicate menu id {} ignored", entry.id);
            continue;
        }
        index.insert(entry.id, kept.len());
        kept.push(entry);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); kept.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, entry) in kept.iter().enumerate() {
        match entry.parent().and_then(|p| index.get(&p)) {
            Some(&parent) => children[parent].push(i),
            None => roots.push(i),
        }
    }

    let sort_key = |i: &usize| kept[*i].sort;
    roots.sort_by_key(sort_key);
    for list in children.iter_mut() {
        list.sort_by_key(sort_key);
    }

    // Pre-order walk from the roots: every parent is listed before its
    // descendants. Entries on a cycle are never reached.
    let mut order: Vec<usize> = Vec::with_capacity(kept.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().rev().copied());
    }

    let dropped = kept.len() - order.len();
    if dropped > 0 {
        warn!(
            "{} menu entries unreachable from any root (cyclic parent_id chain), omitted",
            dropped
        );
    }

    // Assemble bottom-up so each node's children already exist.
    let mut built: Vec<Option<MenuNode>> = (0..kept.len()).map(|_| None).collect();
    for &i in order.iter().rev() {
        let node = MenuNode {
            entry: kept[i].clone(),
            children: children[i].iter().filter_map(|&c| built[c].take()).collect(),
        };
        built[i] = Some(node);
    }

    roots.iter().filter_map(|&i| built[i].take()).collect()
}

/// Depth-first search for a node by id.
pub fn find_node(forest: &[MenuNode], id: MenuId) -> Option<&MenuNode> {
    let mut stack: Vec<&MenuNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id() == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(id: MenuId, parent: MenuId, sort: i32, title: &str) -> MenuEntry {
        let mut m = MenuEntry::new(id, "", format!("/{}", title.to_lowercase()))
            .with_parent(parent)
            .with_sort(sort);
        m.title = title.to_string();
        m
    }

    fn shape(forest: &[MenuNode]) -> Vec<(MenuId, Vec<MenuId>)> {
        forest
            .iter()
            .map(|n| (n.id(), n.children.iter().map(|c| c.id()).collect()))
            .collect()
    }

    #[test]
    fn test_basic_scenario() {
        let menus = vec![menu(1, 0, 2, "B"), menu(2, 0, 1, "A"), menu(3, 1, 1, "B1")];
        let tree = build_menu_tree(&menus);

        assert_eq!(shape(&tree), vec![(2, vec![]), (1, vec![3])]);
        assert_eq!(tree[0].entry.display_name(), "A");
        assert_eq!(tree[1].children[0].entry.display_name(), "B1");
    }

    #[test]
    fn test_children_sorted_stably() {
        let menus = vec![
            menu(1, 0, 0, "Root"),
            menu(10, 1, 5, "C"),
            menu(11, 1, 1, "A"),
            menu(12, 1, 5, "D"),
            menu(13, 1, 1, "B"),
        ];
        let tree = build_menu_tree(&menus);
        assert_eq!(shape(&tree), vec![(1, vec![11, 13, 10, 12])]);
    }

    #[test]
    fn test_child_before_parent_in_input() {
        let menus = vec![menu(3, 1, 1, "B1"), menu(1, 0, 1, "B")];
        let tree = build_menu_tree(&menus);
        assert_eq!(shape(&tree), vec![(1, vec![3])]);
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let menus = vec![menu(5, 99, 1, "Orphan"), menu(6, 0, 0, "Home")];
        let tree = build_menu_tree(&menus);
        assert_eq!(shape(&tree), vec![(6, vec![]), (5, vec![])]);
    }

    #[test]
    fn test_cycle_is_dropped_without_looping() {
        let menus = vec![
            menu(1, 0, 0, "Root"),
            menu(2, 3, 0, "X"),
            menu(3, 2, 0, "Y"),
            menu(4, 4, 0, "Self"),
        ];
        let tree = build_menu_tree(&menus);
        assert_eq!(shape(&tree), vec![(1, vec![])]);
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let menus = vec![menu(1, 0, 0, "First"), menu(1, 0, 0, "Second")];
        let tree = build_menu_tree(&menus);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].entry.title, "First");
    }

    #[test]
    fn test_idempotent() {
        let menus = vec![
            menu(1, 0, 2, "B"),
            menu(2, 0, 1, "A"),
            menu(3, 1, 1, "B1"),
            menu(4, 1, 0, "B0"),
            menu(5, 2, 3, "A1"),
        ];
        assert_eq!(build_menu_tree(&menus), build_menu_tree(&menus));
    }

    #[test]
    fn test_find_node() {
        let menus = vec![menu(1, 0, 2, "B"), menu(3, 1, 1, "B1")];
        let tree = build_menu_tree(&menus);
        assert_eq!(find_node(&tree, 3).map(|n| n.entry.title.as_str()), Some("B1"));
        assert!(find_node(&tree, 42).is_none());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth: MenuId = 200_000;
        let menus: Vec<MenuEntry> = (1..=depth)
            .map(|i| MenuEntry::new(i, format!("M{}", i), "").with_parent(i - 1))
            .collect();

        let tree = build_menu_tree(&menus);
        assert_eq!(tree.len(), 1);

        let mut levels = 0;
        let mut node = &tree[0];
        loop {
            levels += 1;
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
        assert_eq!(levels, depth);
        assert_eq!(find_node(&tree, depth).map(|n| n.id()), Some(depth));
    }
}
