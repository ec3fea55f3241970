use std::time::Duration;

use gamepulse_core::{FilterCommand, SearchDebouncer};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::app::Dashboard;

/// Milliseconds since page load, as a `Duration`
fn now() -> Duration {
    let ms = window().performance().map(|p| p.now()).unwrap_or_default();
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// Debounced free-text search. Keystrokes only commit after a quiet window;
/// Enter commits immediately.
#[component]
pub fn SearchBox() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();
    let debouncer = StoredValue::new(SearchDebouncer::default());
    let text = RwSignal::new(dashboard.state.get_untracked().search.unwrap_or_default());

    // Follow committed changes made elsewhere (navigation, clear filters)
    Effect::new(move || {
        let committed = dashboard.state.with(|s| s.search.clone()).unwrap_or_default();
        let typing = debouncer.with_value(|d| d.pending().is_some());
        if !typing && text.get_untracked().trim() != committed {
            text.set(committed);
        }
    });

    let commit = move |value: String| {
        let value = Some(value).filter(|v| !v.trim().is_empty());
        dashboard.dispatch(FilterCommand::SetSearch(value));
    };

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        text.set(value.clone());

        let started = now();
        debouncer.update_value(|d| d.input(value, started));
        let delay = debouncer
            .with_value(|d| d.remaining(started))
            .unwrap_or_default();

        // Each keystroke schedules a check; only the one past the deadline commits
        Timeout::new(delay.as_millis() as u32 + 1, move || {
            let mut due = None;
            debouncer.update_value(|d| due = d.poll(now()));
            if let Some(value) = due {
                commit(value);
            }
        })
        .forget();
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            let mut due = None;
            debouncer.update_value(|d| due = d.flush());
            commit(due.unwrap_or_else(|| text.get_untracked()));
        }
        "Escape" => {
            debouncer.update_value(|d| d.cancel());
            text.set(String::new());
            commit(String::new());
        }
        _ => {}
    };

    view! {
        <div class="search-box">
            <input
                type="text"
                placeholder="Search games..."
                prop:value=move || text.get()
                on:input=on_input
                on:keydown=on_keydown
            />
            <Show when=move || !text.with(|t| t.is_empty())>
                <button
                    class="search-clear"
                    title="Clear search"
                    on:click=move |_| {
                        debouncer.update_value(|d| d.cancel());
                        text.set(String::new());
                        commit(String::new());
                    }
                >
                    "×"
                </button>
            </Show>
        </div>
    }
}
