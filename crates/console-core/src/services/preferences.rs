// ============================================================================
// Console Core - Preference Service
// File: crates/console-core/src/services/preferences.rs
// ============================================================================
//! Favorites, recently visited menus, theme and watermark settings, read
//! from and written to a [`PreferenceStore`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use console_shared::constants::{
    RECENT_MENU_CAPACITY, STORAGE_KEY_FAVORITES, STORAGE_KEY_RECENTS, STORAGE_KEY_THEME,
    STORAGE_KEY_WATERMARK,
};

use crate::domain::{MenuId, ThemeName, WatermarkSettings};
use crate::error::DomainError;
use crate::repositories::PreferenceStore;

/// Snapshot of everything persisted per user profile.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    pub favorites: Vec<MenuId>,
    pub recents: Vec<MenuId>,
    /// `None` when the user never picked a theme explicitly.
    pub theme: Option<ThemeName>,
    pub watermark: WatermarkSettings,
}

/// Set-insert; a no-op when already present.
pub fn add_favorite(favorites: &[MenuId], id: MenuId) -> Vec<MenuId> {
    let mut next = favorites.to_vec();
    if !next.contains(&id) {
        next.push(id);
    }
    next
}

pub fn remove_favorite(favorites: &[MenuId], id: MenuId) -> Vec<MenuId> {
    favorites.iter().copied().filter(|f| *f != id).collect()
}

/// Most-recently-used list: prepend, drop any earlier occurrence, cap at 10.
pub fn add_recent(recents: &[MenuId], id: MenuId) -> Vec<MenuId> {
    std::iter::once(id)
        .chain(recents.iter().copied().filter(|r| *r != id))
        .take(RECENT_MENU_CAPACITY)
        .collect()
}

pub struct PreferenceService<S: PreferenceStore + ?Sized> {
    store: Arc<S>,
}

impl<S: PreferenceStore + ?Sized> Clone for PreferenceService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Reads every preference. Missing or unreadable values fall back to defaults.
    pub fn load(&self) -> Preferences {
        Preferences {
            favorites: self.read_json(STORAGE_KEY_FAVORITES).unwrap_or_default(),
            recents: self.read_json(STORAGE_KEY_RECENTS).unwrap_or_default(),
            theme: self.load_theme(),
            watermark: self.read_json(STORAGE_KEY_WATERMARK).unwrap_or_default(),
        }
    }

    pub fn load_theme(&self) -> Option<ThemeName> {
        let raw = self.read_raw(STORAGE_KEY_THEME)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(_) => {
                warn!("Ignoring unknown stored theme {:?}", raw);
                None
            }
        }
    }

    pub fn save_favorites(&self, favorites: &[MenuId]) -> Result<(), DomainError> {
        self.write_json(STORAGE_KEY_FAVORITES, &favorites)
    }

    pub fn save_recents(&self, recents: &[MenuId]) -> Result<(), DomainError> {
        self.write_json(STORAGE_KEY_RECENTS, &recents)
    }

    /// Stored as the bare name, not JSON.
    pub fn save_theme(&self, theme: ThemeName) -> Result<(), DomainError> {
        self.store.set(STORAGE_KEY_THEME, theme.as_str())
    }

    pub fn save_watermark(&self, settings: &WatermarkSettings) -> Result<(), DomainError> {
        self.write_json(STORAGE_KEY_WATERMARK, settings)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read preference {}: {}", key, e);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Preference {} is not valid JSON, using default: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let json = serde_json::to_string(value)
            .map_err(|e| DomainError::StorageError(e.to_string()))?;
        debug!("Persisting preference {}", key);
        self.store.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;

    #[test]
    fn test_favorites_are_a_set() {
        let f = add_favorite(&[], 3);
        let f = add_favorite(&f, 5);
        let f = add_favorite(&f, 3);
        assert_eq!(f, vec![3, 5]);
        assert_eq!(remove_favorite(&f, 3), vec![5]);
        assert_eq!(remove_favorite(&f, 9), vec![3, 5]);
    }

    #[test]
    fn test_add_recent_moves_to_front() {
        let r = add_recent(&[1, 2, 3], 2);
        assert_eq!(r, vec![2, 1, 3]);
    }

    #[test]
    fn test_add_recent_caps_and_never_duplicates() {
        let mut recents = Vec::new();
        for id in [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 3, 7, 3] {
            recents = add_recent(&recents, id);
            assert!(recents.len() <= RECENT_MENU_CAPACITY);
            let mut sorted = recents.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), recents.len());
        }
        assert_eq!(recents[..3], [3, 7, 12]);
        assert_eq!(recents.len(), RECENT_MENU_CAPACITY);
    }

    #[test]
    fn test_load_defaults_when_empty() {
        let service = PreferenceService::new(Arc::new(MemoryStore::default()));
        assert_eq!(service.load(), Preferences::default());
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let store = MemoryStore::with(&[
            ("favoriteMenus", "[1, 2"),
            ("recentMenus", "[4]"),
            ("theme", "neon"),
            ("watermarkSettings", "not json"),
        ]);
        let prefs = PreferenceService::new(Arc::new(store)).load();
        assert!(prefs.favorites.is_empty());
        assert_eq!(prefs.recents, vec![4]);
        assert_eq!(prefs.theme, None);
        assert_eq!(prefs.watermark, WatermarkSettings::default());
    }

    #[test]
    fn test_save_formats() {
        let store = Arc::new(MemoryStore::default());
        let service = PreferenceService::new(store.clone());
        service.save_favorites(&[1, 4]).unwrap();
        service.save_theme(ThemeName::Dark).unwrap();
        service.save_watermark(&WatermarkSettings::default()).unwrap();

        assert_eq!(store.raw("favoriteMenus").as_deref(), Some("[1,4]"));
        assert_eq!(store.raw("theme").as_deref(), Some("dark"));
        assert!(store.raw("watermarkSettings").unwrap().contains("\"fontSize\":18"));

        let reloaded = service.load();
        assert_eq!(reloaded.favorites, vec![1, 4]);
        assert_eq!(reloaded.theme, Some(ThemeName::Dark));
    }
}
