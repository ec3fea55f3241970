//! Browser address bar synchronization
//!
//! The query string is the durable copy of the filter state: it is read once
//! on startup, rewritten after every commit and read again on back/forward.

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::console;

/// How a new URL is recorded in session history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New history entry (user-visible filter change)
    Push,
    /// Overwrite the current entry (canonicalizing on load)
    Replace,
}

/// Current `location.search`, including the leading `?`
pub fn current_search() -> String {
    window().location().search().unwrap_or_default()
}

/// Write `search` (`?a=1` or empty) to the address bar, keeping the path.
pub fn write_search(search: &str, mode: HistoryMode) {
    let window = window();
    if window.location().search().unwrap_or_default() == search {
        return;
    }
    let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
    let url = format!("{}{}", path, search);

    let history = match window.history() {
        Ok(history) => history,
        Err(e) => {
            console::error_1(&format!("History API unavailable: {:?}", e).into());
            return;
        }
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&url)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(&url)),
    };
    if let Err(e) = result {
        console::error_1(&format!("Failed to update URL: {:?}", e).into());
    }
}

/// Run `on_change` with the new `location.search` on back/forward navigation.
pub fn on_navigation(on_change: impl Fn(String) + 'static) {
    let handle = window_event_listener(leptos::ev::popstate, move |_| {
        on_change(current_search());
    });
    // The listener lives as long as the page
    std::mem::forget(handle);
}
