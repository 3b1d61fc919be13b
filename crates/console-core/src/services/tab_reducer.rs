// ============================================================================
// Console Core - Tab Reducer
// File: crates/console-core/src/services/tab_reducer.rs
// ============================================================================
//! Open-tab state machine.
//!
//! Every transition is a pure, total function of `(TabState, TabAction)`.
//! Ids that are not currently open leave the state untouched.

use serde::Serialize;

use crate::domain::Tab;

/// Ordered open tabs plus the active tab id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabState {
    pub open_tabs: Vec<Tab>,
    pub active_tab: Option<String>,
}

impl Default for TabState {
    fn default() -> Self {
        let dashboard = Tab::dashboard();
        Self {
            active_tab: Some(dashboard.id.clone()),
            open_tabs: vec![dashboard],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabAction {
    /// Focus the tab if already open, otherwise append it and focus it.
    Open(Tab),
    Close(String),
    CloseOthers(String),
    CloseAll,
    CloseLeft(String),
    CloseRight(String),
    SetActive(String),
}

impl TabState {
    pub fn reduce(&self, action: &TabAction) -> TabState {
        match action {
            TabAction::Open(tab) => self.open(tab),
            TabAction::Close(id) => self.close(id),
            TabAction::CloseOthers(id) => self.close_others(id),
            TabAction::CloseAll => self.close_all(),
            TabAction::CloseLeft(id) => self.close_left(id),
            TabAction::CloseRight(id) => self.close_right(id),
            TabAction::SetActive(id) => self.set_active(id),
        }
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.open_tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.open_tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn is_active(&self, tab_id: &str) -> bool {
        self.active_tab.as_deref() == Some(tab_id)
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active_tab.as_deref().and_then(|id| self.get(id))
    }

    fn open(&self, tab: &Tab) -> TabState {
        let mut next = self.clone();
        if self.position(&tab.id).is_none() {
            next.open_tabs.push(tab.clone());
        }
        next.active_tab = Some(tab.id.clone());
        next
    }

    fn close(&self, tab_id: &str) -> TabState {
        let Some(removed_index) = self.position(tab_id) else {
            return self.clone();
        };

        let mut next = self.clone();
        next.open_tabs.remove(removed_index);

        if self.is_active(tab_id) {
            // Prefer the left neighbour, which after removal sits at index - 1.
            next.active_tab = next
                .open_tabs
                .get(removed_index.saturating_sub(1))
                .map(|t| t.id.clone());
        }
        next
    }

    fn close_others(&self, tab_id: &str) -> TabState {
        if self.position(tab_id).is_none() {
            return self.clone();
        }
        TabState {
            open_tabs: self
                .open_tabs
                .iter()
                .filter(|t| t.id == tab_id || !t.closable)
                .cloned()
                .collect(),
            active_tab: Some(tab_id.to_string()),
        }
    }

    fn close_all(&self) -> TabState {
        let open_tabs: Vec<Tab> = self.open_tabs.iter().filter(|t| !t.closable).cloned().collect();
        let active_tab = open_tabs
            .first()
            .map(|t| t.id.clone())
            .or_else(|| Some(Tab::dashboard().id));
        TabState {
            open_tabs,
            active_tab,
        }
    }

    fn close_left(&self, tab_id: &str) -> TabState {
        match self.position(tab_id) {
            Some(index) => self.close_each(&self.open_tabs[..index]),
            None => self.clone(),
        }
    }

    fn close_right(&self, tab_id: &str) -> TabState {
        match self.position(tab_id) {
            Some(index) => self.close_each(&self.open_tabs[index + 1..]),
            None => self.clone(),
        }
    }

    /// Closes the closable tabs of `tabs` one at a time, in order.
    fn close_each(&self, tabs: &[Tab]) -> TabState {
        tabs.iter()
            .filter(|t| t.closable)
            .fold(self.clone(), |state, t| state.close(&t.id))
    }

    fn set_active(&self, tab_id: &str) -> TabState {
        let mut next = self.clone();
        if self.position(tab_id).is_some() {
            next.active_tab = Some(tab_id.to_string());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str) -> Tab {
        Tab::new(id, id, format!("/{}", id.to_lowercase()))
    }

    fn state(ids: &[&str], active: &str) -> TabState {
        let mut open_tabs = vec![Tab::dashboard()];
        open_tabs.extend(ids.iter().map(|id| tab(id)));
        TabState {
            open_tabs,
            active_tab: Some(active.to_string()),
        }
    }

    fn ids(state: &TabState) -> Vec<&str> {
        state.open_tabs.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_open_appends_and_activates() {
        let next = TabState::default().reduce(&TabAction::Open(tab("T1")));
        assert_eq!(ids(&next), ["dashboard", "T1"]);
        assert!(next.is_active("T1"));
    }

    #[test]
    fn test_open_is_idempotent() {
        let s = TabState::default()
            .reduce(&TabAction::Open(tab("T1")))
            .reduce(&TabAction::Open(tab("T2")))
            .reduce(&TabAction::Open(tab("T1")));
        assert_eq!(ids(&s), ["dashboard", "T1", "T2"]);
        assert_eq!(s.open_tabs.iter().filter(|t| t.id == "T1").count(), 1);
        assert!(s.is_active("T1"));
    }

    #[test]
    fn test_close_active_selects_left_neighbour() {
        let s = state(&["T1", "T2"], "T2").reduce(&TabAction::Close("T2".into()));
        assert_eq!(ids(&s), ["dashboard", "T1"]);
        assert_eq!(s.active_tab.as_deref(), Some("T1"));
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let s = state(&["T1", "T2"], "T1").reduce(&TabAction::Close("T2".into()));
        assert_eq!(ids(&s), ["dashboard", "T1"]);
        assert_eq!(s.active_tab.as_deref(), Some("T1"));
    }

    #[test]
    fn test_close_middle_active_uses_post_removal_index() {
        let s = state(&["T1", "T2", "T3"], "T2").reduce(&TabAction::Close("T2".into()));
        assert_eq!(s.active_tab.as_deref(), Some("T1"));

        // Removing index 0 falls back to the new first tab.
        let s = TabState {
            open_tabs: vec![tab("A"), tab("B")],
            active_tab: Some("A".into()),
        }
        .reduce(&TabAction::Close("A".into()));
        assert_eq!(s.active_tab.as_deref(), Some("B"));
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let before = state(&["T1"], "T1");
        assert_eq!(before.reduce(&TabAction::Close("nope".into())), before);
        assert_eq!(before.reduce(&TabAction::SetActive("nope".into())), before);
        assert_eq!(before.reduce(&TabAction::CloseOthers("nope".into())), before);
    }

    #[test]
    fn test_close_last_tab_clears_active() {
        let s = TabState {
            open_tabs: vec![tab("A")],
            active_tab: Some("A".into()),
        }
        .reduce(&TabAction::Close("A".into()));
        assert!(s.open_tabs.is_empty());
        assert_eq!(s.active_tab, None);
    }

    #[test]
    fn test_close_others_keeps_pinned() {
        let s = state(&["T1", "T2", "T3"], "T1").reduce(&TabAction::CloseOthers("T2".into()));
        assert_eq!(ids(&s), ["dashboard", "T2"]);
        assert!(s.is_active("T2"));
    }

    #[test]
    fn test_close_all_leaves_pinned_subset() {
        let s = state(&["T1", "T2"], "T2").reduce(&TabAction::CloseAll);
        assert_eq!(ids(&s), ["dashboard"]);
        assert!(s.is_active("dashboard"));
    }

    #[test]
    fn test_close_left_and_right() {
        let s = state(&["T1", "T2", "T3"], "T3").reduce(&TabAction::CloseLeft("T2".into()));
        assert_eq!(ids(&s), ["dashboard", "T2", "T3"]);
        assert!(s.is_active("T3"));

        let s = state(&["T1", "T2", "T3"], "T3").reduce(&TabAction::CloseRight("T1".into()));
        assert_eq!(ids(&s), ["dashboard", "T1"]);
        assert!(s.is_active("T1"));
    }

    #[test]
    fn test_set_active() {
        let s = state(&["T1", "T2"], "T2").reduce(&TabAction::SetActive("dashboard".into()));
        assert!(s.is_active("dashboard"));
    }

    #[test]
    fn test_dashboard_survives_any_open_close_sequence() {
        let mut s = TabState::default();
        let script = ["A", "B", "A", "C", "dashboard", "B", "C", "A", "D", "D"];
        for (step, id) in script.iter().enumerate() {
            let action = if step % 3 == 2 {
                TabAction::Close(id.to_string())
            } else {
                TabAction::Open(tab(id))
            };
            // Closing the pinned tab is refused before it reaches the reducer.
            if matches!(&action, TabAction::Close(id) if s.get(id).is_some_and(|t| !t.closable)) {
                continue;
            }
            s = s.reduce(&action);
            assert!(s.get("dashboard").is_some(), "step {step}");
            assert!(s.active().is_some(), "step {step}");
        }
    }
}
