use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use web_sys::window;

/// Minimal string key/value storage, the part of `localStorage` the app uses.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage`. Reads return `None` and writes are dropped when
/// storage is unavailable (private mode, no window).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        match get_local_storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("localStorage rejected write of {}", key);
                }
            }
            None => log::debug!("localStorage unavailable, {} not persisted", key),
        }
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set_item("k", "v");
        assert_eq!(other.get_item("k").as_deref(), Some("v"));
        assert_eq!(other.get_item("missing"), None);
    }
}
