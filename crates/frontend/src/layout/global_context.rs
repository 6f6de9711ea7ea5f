use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Routed pages. Exactly one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Rdap,
    Programs,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Rdap, Page::Programs];

    pub fn key(&self) -> &'static str {
        match self {
            Page::Rdap => "a002_rdap",
            Page::Programs => "a001_program",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Rdap => "RDAP",
            Page::Programs => "Programs",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Rdap => "globe",
            Page::Programs => "target",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Page::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Reads `?active=<key>`; unknown keys fall back to the RDAP page.
pub fn page_from_query(search: &str) -> Page {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get("active")
        .and_then(|key| Page::from_key(key))
        .unwrap_or(Page::Rdap)
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::Rdap),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores the active page from the URL and keeps the URL in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        self.active.set(page_from_query(&search));

        let this = *self;
        Effect::new(move |_| {
            let page = this.active.get();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active", page.key())])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open(&self, page: Page) {
        log::debug!("open page '{}'", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_query() {
        assert_eq!(page_from_query("?active=a001_program"), Page::Programs);
        assert_eq!(page_from_query("active=a002_rdap"), Page::Rdap);
        assert_eq!(page_from_query("?active=unknown"), Page::Rdap);
        assert_eq!(page_from_query(""), Page::Rdap);
    }

    #[test]
    fn test_page_keys_unique() {
        assert_ne!(Page::Rdap.key(), Page::Programs.key());
        assert_eq!(Page::from_key("a002_rdap"), Some(Page::Rdap));
    }
}
