//! Clipboard access through the Web Clipboard API.

use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

/// Copies `text` and reports whether the browser accepted it.
pub fn copy_to_clipboard<F>(text: &str, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let copied = match web_sys::window() {
            Some(window) => {
                let clipboard = window.navigator().clipboard();
                JsFuture::from(clipboard.write_text(&text)).await.is_ok()
            }
            None => false,
        };
        if !copied {
            log::warn!("clipboard write failed");
        }
        on_done(copied);
    });
}
