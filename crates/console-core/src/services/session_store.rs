// ============================================================================
// Console Core - Session Store
// File: crates/console-core/src/services/session_store.rs
// Description: Menu/tab session state, typed actions and the dispatch loop
// ============================================================================
//! The session store owns everything the console shell renders: the
//! authorised menu lists, the open tabs, and user-local preferences.
//!
//! State only changes through [`SessionStore::dispatch`], which runs the pure
//! [`reduce`] function, persists any preference slice that changed, and
//! notifies subscribers.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::domain::{MenuEntry, MenuId, MenuNode, Tab, ThemeName, WatermarkSettings, WatermarkUser};
use crate::error::DomainError;
use crate::repositories::{MenuSource, PreferenceStore};
use crate::services::fetch_generation::{FetchGenerations, FetchTicket, MenuScope, MenuTarget};
use crate::services::menu_filter::{apply_view, filter_menus, MenuView};
use crate::services::menu_tree::build_menu_tree;
use crate::services::preferences::{self, PreferenceService, Preferences};
use crate::services::tab_reducer::{TabAction, TabState};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub menus: Vec<MenuEntry>,
    pub user_menus: Vec<MenuEntry>,
    #[serde(flatten)]
    pub tabs: TabState,
    pub sidebar_collapsed: bool,
    pub favorites: Vec<MenuId>,
    pub recents: Vec<MenuId>,
    pub search_text: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped to force the active view to remount.
    pub refresh_key: Option<i64>,
    pub theme: ThemeName,
    /// Whether `theme` was picked by the user rather than following the system.
    pub theme_explicit: bool,
    pub watermark: WatermarkSettings,
}

impl SessionState {
    pub fn from_preferences(prefs: Preferences) -> Self {
        Self {
            menus: Vec::new(),
            user_menus: Vec::new(),
            tabs: TabState::default(),
            sidebar_collapsed: false,
            favorites: prefs.favorites,
            recents: prefs.recents,
            search_text: String::new(),
            loading: false,
            error: None,
            refresh_key: None,
            theme: prefs.theme.unwrap_or_default(),
            theme_explicit: prefs.theme.is_some(),
            watermark: prefs.watermark,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::from_preferences(Preferences::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    SetLoading(bool),
    SetError(String),
    SetMenus(Vec<MenuEntry>),
    SetUserMenus(Vec<MenuEntry>),
    OpenTab(Tab),
    CloseTab(String),
    SetActiveTab(String),
    CloseOtherTabs(String),
    CloseAllTabs,
    CloseLeftTabs(String),
    CloseRightTabs(String),
    RefreshTab { stamp_ms: i64 },
    ToggleSidebar,
    AddFavorite(MenuId),
    RemoveFavorite(MenuId),
    AddRecent(MenuId),
    SetSearchText(String),
    SetTheme(ThemeName),
    /// Adopt the system colour scheme unless the user picked a theme.
    FollowSystemTheme(ThemeName),
    SetWatermark(WatermarkSettings),
    Logout,
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::SetLoading(_) => "SET_LOADING",
            SessionAction::SetError(_) => "SET_ERROR",
            SessionAction::SetMenus(_) => "SET_MENUS",
            SessionAction::SetUserMenus(_) => "SET_USER_MENUS",
            SessionAction::OpenTab(_) => "ADD_TAB",
            SessionAction::CloseTab(_) => "REMOVE_TAB",
            SessionAction::SetActiveTab(_) => "SET_ACTIVE_TAB",
            SessionAction::CloseOtherTabs(_) => "CLOSE_OTHER_TABS",
            SessionAction::CloseAllTabs => "CLOSE_ALL_TABS",
            SessionAction::CloseLeftTabs(_) => "CLOSE_LEFT_TABS",
            SessionAction::CloseRightTabs(_) => "CLOSE_RIGHT_TABS",
            SessionAction::RefreshTab { .. } => "REFRESH_TAB",
            SessionAction::ToggleSidebar => "TOGGLE_SIDEBAR",
            SessionAction::AddFavorite(_) => "ADD_FAVORITE",
            SessionAction::RemoveFavorite(_) => "REMOVE_FAVORITE",
            SessionAction::AddRecent(_) => "ADD_RECENT",
            SessionAction::SetSearchText(_) => "SET_SEARCH_TEXT",
            SessionAction::SetTheme(_) => "SET_THEME",
            SessionAction::FollowSystemTheme(_) => "FOLLOW_SYSTEM_THEME",
            SessionAction::SetWatermark(_) => "SET_WATERMARK",
            SessionAction::Logout => "LOGOUT",
        }
    }
}

/// Published after every dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub revision: u64,
    pub action: &'static str,
}

/// Pure transition function.
pub fn reduce(state: &SessionState, action: &SessionAction) -> SessionState {
    let mut next = state.clone();
    match action {
        SessionAction::SetLoading(loading) => next.loading = *loading,
        SessionAction::SetError(message) => {
            next.error = Some(message.clone());
            next.loading = false;
        }
        SessionAction::SetMenus(menus) => {
            next.menus = menus.clone();
            next.loading = false;
            next.error = None;
        }
        SessionAction::SetUserMenus(menus) => {
            next.user_menus = menus.clone();
            next.loading = false;
            next.error = None;
        }
        SessionAction::OpenTab(tab) => next.tabs = state.tabs.reduce(&TabAction::Open(tab.clone())),
        SessionAction::CloseTab(id) => next.tabs = state.tabs.reduce(&TabAction::Close(id.clone())),
        SessionAction::SetActiveTab(id) => {
            next.tabs = state.tabs.reduce(&TabAction::SetActive(id.clone()))
        }
        SessionAction::CloseOtherTabs(id) => {
            next.tabs = state.tabs.reduce(&TabAction::CloseOthers(id.clone()))
        }
        SessionAction::CloseAllTabs => next.tabs = state.tabs.reduce(&TabAction::CloseAll),
        SessionAction::CloseLeftTabs(id) => {
            next.tabs = state.tabs.reduce(&TabAction::CloseLeft(id.clone()))
        }
        SessionAction::CloseRightTabs(id) => {
            next.tabs = state.tabs.reduce(&TabAction::CloseRight(id.clone()))
        }
        SessionAction::RefreshTab { stamp_ms } => next.refresh_key = Some(*stamp_ms),
        SessionAction::ToggleSidebar => next.sidebar_collapsed = !state.sidebar_collapsed,
        SessionAction::AddFavorite(id) => next.favorites = preferences::add_favorite(&state.favorites, *id),
        SessionAction::RemoveFavorite(id) => {
            next.favorites = preferences::remove_favorite(&state.favorites, *id)
        }
        SessionAction::AddRecent(id) => next.recents = preferences::add_recent(&state.recents, *id),
        SessionAction::SetSearchText(text) => next.search_text = text.clone(),
        SessionAction::SetTheme(theme) => {
            next.theme = *theme;
            next.theme_explicit = true;
        }
        SessionAction::FollowSystemTheme(theme) => {
            if !state.theme_explicit {
                next.theme = *theme;
            }
        }
        SessionAction::SetWatermark(settings) => next.watermark = settings.clone(),
        SessionAction::Logout => {
            next.menus.clear();
            next.user_menus.clear();
            next.tabs = TabState::default();
            next.search_text.clear();
            next.loading = false;
            next.error = None;
            next.refresh_key = None;
        }
    }
    next
}

pub struct SessionStore<S: PreferenceStore + ?Sized> {
    state: SessionState,
    preferences: PreferenceService<S>,
    events: broadcast::Sender<SessionEvent>,
    generations: FetchGenerations,
    revision: u64,
}

impl<S: PreferenceStore + ?Sized> SessionStore<S> {
    /// Builds a fresh session from whatever preferences `store` holds.
    pub fn new(store: Arc<S>) -> Self {
        let preferences = PreferenceService::new(store);
        let state = SessionState::from_preferences(preferences.load());
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        info!(
            "Session store ready: {} favorites, {} recents, theme {}",
            state.favorites.len(),
            state.recents.len(),
            state.theme
        );
        Self {
            state,
            preferences,
            events,
            generations: FetchGenerations::default(),
            revision: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn dispatch(&mut self, action: SessionAction) {
        let next = reduce(&self.state, &action);
        self.persist_changes(&next);
        self.state = next;
        self.revision += 1;

        let event = SessionEvent {
            revision: self.revision,
            action: action.name(),
        };
        debug!("Dispatched {} (revision {})", event.action, event.revision);
        // No receivers is the normal case outside of rendering.
        let _ = self.events.send(event);
    }

    fn persist_changes(&self, next: &SessionState) {
        let prev = &self.state;
        let mut results = Vec::new();

        if prev.favorites != next.favorites {
            results.push(("favorites", self.preferences.save_favorites(&next.favorites)));
        }
        if prev.recents != next.recents {
            results.push(("recents", self.preferences.save_recents(&next.recents)));
        }
        if next.theme_explicit && (prev.theme != next.theme || !prev.theme_explicit) {
            results.push(("theme", self.preferences.save_theme(next.theme)));
        }
        if prev.watermark != next.watermark {
            results.push(("watermark", self.preferences.save_watermark(&next.watermark)));
        }

        for (slice, result) in results {
            if let Err(e) = result {
                warn!("Failed to persist {}: {}", slice, e);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------------

    /// Opens a tab for `menu` and records it as recently visited. Groups are
    /// ignored; returns whether a tab was opened or focused.
    pub fn open_menu(&mut self, menu: &MenuEntry) -> bool {
        let Some(tab) = Tab::from_menu(menu) else {
            debug!("Menu {} is a group, not opening a tab", menu.id);
            return false;
        };
        self.dispatch(SessionAction::OpenTab(tab));
        self.dispatch(SessionAction::AddRecent(menu.id));
        true
    }

    pub fn open_menu_by_id(&mut self, id: MenuId) -> Result<bool, DomainError> {
        let menu = self
            .active_menus()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(DomainError::MenuNotFound(id))?;
        Ok(self.open_menu(&menu))
    }

    /// Closing a pinned tab is refused; unknown ids are ignored.
    pub fn close_tab(&mut self, tab_id: &str) -> Result<(), DomainError> {
        if let Some(tab) = self.state.tabs.get(tab_id) {
            if !tab.closable {
                return Err(DomainError::TabNotClosable(tab_id.to_string()));
            }
        }
        self.dispatch(SessionAction::CloseTab(tab_id.to_string()));
        Ok(())
    }

    pub fn set_active_tab(&mut self, tab_id: &str) {
        self.dispatch(SessionAction::SetActiveTab(tab_id.to_string()));
    }

    pub fn close_other_tabs(&mut self, tab_id: &str) {
        self.dispatch(SessionAction::CloseOtherTabs(tab_id.to_string()));
    }

    pub fn close_all_tabs(&mut self) {
        self.dispatch(SessionAction::CloseAllTabs);
    }

    pub fn close_left_tabs(&mut self, tab_id: &str) {
        self.dispatch(SessionAction::CloseLeftTabs(tab_id.to_string()));
    }

    pub fn close_right_tabs(&mut self, tab_id: &str) {
        self.dispatch(SessionAction::CloseRightTabs(tab_id.to_string()));
    }

    pub fn refresh_tab(&mut self) {
        self.dispatch(SessionAction::RefreshTab {
            stamp_ms: Utc::now().timestamp_millis(),
        });
    }

    // ------------------------------------------------------------------------
    // Sidebar and preferences
    // ------------------------------------------------------------------------

    pub fn toggle_sidebar(&mut self) {
        self.dispatch(SessionAction::ToggleSidebar);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.dispatch(SessionAction::SetSearchText(text.into()));
    }

    pub fn is_favorite(&self, id: MenuId) -> bool {
        self.state.favorites.contains(&id)
    }

    pub fn add_favorite(&mut self, id: MenuId) {
        self.dispatch(SessionAction::AddFavorite(id));
    }

    pub fn remove_favorite(&mut self, id: MenuId) {
        self.dispatch(SessionAction::RemoveFavorite(id));
    }

    /// Returns whether `id` is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: MenuId) -> bool {
        if self.is_favorite(id) {
            self.remove_favorite(id);
            false
        } else {
            self.add_favorite(id);
            true
        }
    }

    pub fn set_theme(&mut self, name: &str) -> Result<(), DomainError> {
        let theme: ThemeName = name.parse()?;
        self.dispatch(SessionAction::SetTheme(theme));
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> ThemeName {
        let theme = self.state.theme.toggled();
        self.dispatch(SessionAction::SetTheme(theme));
        theme
    }

    pub fn follow_system_theme(&mut self, prefers_dark: bool) {
        self.dispatch(SessionAction::FollowSystemTheme(ThemeName::from_system(prefers_dark)));
    }

    pub fn save_watermark(&mut self, settings: WatermarkSettings) -> Result<(), DomainError> {
        settings.validate()?;
        self.dispatch(SessionAction::SetWatermark(settings));
        Ok(())
    }

    pub fn reset_watermark(&mut self) {
        self.dispatch(SessionAction::SetWatermark(WatermarkSettings::default()));
    }

    pub fn watermark_text(&self, user: Option<&WatermarkUser>) -> String {
        self.state.watermark.display_text(user)
    }

    /// Drops the session's menus and tabs; preferences survive. Fetches still
    /// in flight can no longer apply their results.
    pub fn logout(&mut self) {
        self.generations.invalidate_all();
        self.dispatch(SessionAction::Logout);
    }

    // ------------------------------------------------------------------------
    // Menu selectors
    // ------------------------------------------------------------------------

    /// The user's authorised menus, or the full list when none were loaded.
    pub fn active_menus(&self) -> &[MenuEntry] {
        if self.state.user_menus.is_empty() {
            &self.state.menus
        } else {
            &self.state.user_menus
        }
    }

    pub fn filtered_menus(&self) -> Vec<MenuEntry> {
        filter_menus(self.active_menus(), &self.state.search_text)
    }

    pub fn menu_tree(&self, view: MenuView) -> Vec<MenuNode> {
        apply_view(
            build_menu_tree(&self.filtered_menus()),
            view,
            &self.state.favorites,
            &self.state.recents,
        )
    }

    // ------------------------------------------------------------------------
    // Menu loading
    // ------------------------------------------------------------------------

    pub fn begin_menu_fetch(&mut self, scope: MenuScope) -> FetchTicket {
        let ticket = self.generations.issue(scope);
        debug!("Menu fetch {:?} issued (generation {})", scope, ticket.generation);
        self.dispatch(SessionAction::SetLoading(true));
        ticket
    }

    /// Applies a fetch result if `ticket` is still the newest for its list.
    /// Returns `false` when the result was stale and dropped.
    pub fn finish_menu_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<MenuEntry>, String>,
    ) -> bool {
        if !self.generations.is_current(&ticket) {
            info!(
                "Discarding stale menu response {:?} (generation {}, latest {})",
                ticket.scope,
                ticket.generation,
                self.generations.latest(ticket.scope.target())
            );
            return false;
        }

        match result {
            Ok(menus) => {
                info!("Loaded {} menus for {:?}", menus.len(), ticket.scope);
                let action = match ticket.scope.target() {
                    MenuTarget::All => SessionAction::SetMenus(menus),
                    MenuTarget::User => SessionAction::SetUserMenus(menus),
                };
                self.dispatch(action);
            }
            Err(message) => {
                error!("Menu fetch {:?} failed: {}", ticket.scope, message);
                self.dispatch(SessionAction::SetError(message));
            }
        }
        true
    }

    /// Fetches, then applies the result. Errors are recorded in the state and
    /// also returned; the previous menus stay in place.
    pub async fn fetch_menus<M: MenuSource + ?Sized>(
        &mut self,
        source: &M,
        scope: MenuScope,
    ) -> Result<(), DomainError> {
        let ticket = self.begin_menu_fetch(scope);
        let result = match scope {
            MenuScope::All => source.all_menus().await,
            MenuScope::Current => source.current_menus().await,
            MenuScope::User(user_id) => source.user_menus(user_id).await,
            MenuScope::Permissions(user_id) => source.permission_menus(user_id).await,
        };

        match result {
            Ok(menus) => {
                self.finish_menu_fetch(ticket, Ok(menus));
                Ok(())
            }
            Err(e) => {
                self.finish_menu_fetch(ticket, Err(e.to_string()));
                Err(e)
            }
        }
    }
}
