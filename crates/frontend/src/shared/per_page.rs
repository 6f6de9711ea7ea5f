//! Global rows-per-page preference shared by every table and kept in `localStorage`.

use crate::shared::config::config;
use crate::shared::storage::{BrowserStorage, KeyValueStore};
use leptos::prelude::*;
use std::sync::Arc;

/// Reads and writes the per-page value under one fixed storage key.
#[derive(Clone)]
pub struct PerPagePreference {
    store: Arc<dyn KeyValueStore>,
    key: String,
    default: usize,
}

impl PerPagePreference {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: usize) -> Self {
        Self {
            store,
            key: key.into(),
            default: default.max(1),
        }
    }

    /// Preference backed by `localStorage` with the configured key and default.
    pub fn browser() -> Self {
        let table = &config().table;
        Self::new(
            Arc::new(BrowserStorage),
            table.per_page_storage_key.clone(),
            table.default_per_page,
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value, or the default when it is absent, non-numeric or zero.
    pub fn load(&self) -> usize {
        self.store
            .get_item(&self.key)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(self.default)
    }

    pub fn set(&self, value: usize) {
        self.store.set_item(&self.key, &value.to_string());
    }
}

/// App-wide per-page value. Provided once by `App`.
#[derive(Clone, Copy)]
pub struct GlobalPerPage {
    value: RwSignal<usize>,
    preference: StoredValue<PerPagePreference>,
}

impl GlobalPerPage {
    pub fn new(preference: PerPagePreference) -> Self {
        Self {
            value: RwSignal::new(preference.load()),
            preference: StoredValue::new(preference),
        }
    }

    pub fn value(&self) -> Signal<usize> {
        self.value.into()
    }

    pub fn get_untracked(&self) -> usize {
        self.value.get_untracked()
    }

    /// Updates every subscribed table and persists the value.
    pub fn set(&self, value: usize) {
        if value == 0 {
            return;
        }
        self.preference.with_value(|p| p.set(value));
        self.value.set(value);
    }
}

/// `(per_page, set_per_page)` from the app context, or a standalone
/// `localStorage`-backed instance when no context is provided.
pub fn use_global_per_page() -> (Signal<usize>, Callback<usize>) {
    let global = use_context::<GlobalPerPage>()
        .unwrap_or_else(|| GlobalPerPage::new(PerPagePreference::browser()));
    (global.value(), Callback::new(move |n: usize| global.set(n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStore;

    fn preference(store: &MemoryStore) -> PerPagePreference {
        PerPagePreference::new(Arc::new(store.clone()), "globalPerPage", 10)
    }

    #[test]
    fn test_default_when_empty() {
        let store = MemoryStore::new();
        assert_eq!(preference(&store).load(), 10);
    }

    #[test]
    fn test_persists_across_reload() {
        let store = MemoryStore::new();
        let global = GlobalPerPage::new(preference(&store));
        global.set(50);
        assert_eq!(global.get_untracked(), 50);
        assert_eq!(store.get_item("globalPerPage").as_deref(), Some("50"));

        // a fresh instance over the same storage sees the saved value
        let reloaded = GlobalPerPage::new(preference(&store));
        assert_eq!(reloaded.get_untracked(), 50);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let store = MemoryStore::new();
        store.set_item("globalPerPage", "abc");
        assert_eq!(preference(&store).load(), 10);
        store.set_item("globalPerPage", "0");
        assert_eq!(preference(&store).load(), 10);
        store.set_item("globalPerPage", " 25 ");
        assert_eq!(preference(&store).load(), 25);
    }

    #[test]
    fn test_zero_is_ignored() {
        let store = MemoryStore::new();
        let global = GlobalPerPage::new(preference(&store));
        global.set(0);
        assert_eq!(global.get_untracked(), 10);
        assert_eq!(store.get_item("globalPerPage"), None);
    }
}
