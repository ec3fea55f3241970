use gamepulse_core::filters::fields::AppType;
use gamepulse_core::FilterCommand;
use leptos::prelude::*;

use super::SearchBox;
use crate::app::Dashboard;

fn type_label(app_type: AppType) -> &'static str {
    match app_type {
        AppType::All => "All types",
        AppType::Game => "Games",
        AppType::Dlc => "DLC",
        AppType::Demo => "Demos",
        AppType::Mod => "Mods",
        AppType::Video => "Videos",
        AppType::Music => "Soundtracks",
    }
}

#[component]
pub fn Toolbar() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let active_count = move || dashboard.state.with(|s| s.active_filter_count());
    let summary = move || dashboard.state.with(|s| s.describe());
    let total = move || {
        dashboard.results.with(|r| {
            r.as_ref()
                .and_then(|r| r.stats.get("total"))
                .and_then(|v| v.as_u64())
        })
    };

    view! {
        <header class="toolbar">
            <div class="toolbar-left">
                <h1 class="app-title">"GamePulse"</h1>
            </div>
            <div class="toolbar-center">
                <SearchBox />
                <select
                    class="type-dropdown"
                    prop:value=move || dashboard.state.with(|s| s.app_type.as_param())
                    on:change=move |ev| {
                        if let Some(app_type) = AppType::from_param(&event_target_value(&ev)) {
                            dashboard.dispatch(FilterCommand::SetType(app_type));
                        }
                    }
                >
                    {AppType::ALL
                        .iter()
                        .map(|t| view! { <option value=t.as_param()>{type_label(*t)}</option> })
                        .collect_view()}
                </select>
            </div>
            <div class="toolbar-right">
                <span class="filter-summary" title=summary>
                    {move || match active_count() {
                        0 => "No filters".to_string(),
                        1 => "1 filter".to_string(),
                        n => format!("{} filters", n),
                    }}
                </span>
                {move || total().map(|n| view! { <span class="result-total">{format!("{} games", n)}</span> })}
                <Show when=move || dashboard.compare.with(|c| !c.ids().is_empty())>
                    <span class="compare-indicator">
                        {move || dashboard.compare.with(|c| format!("Compare ({})", c.ids().len()))}
                        <button class="compare-clear" title="Clear compare" on:click=move |_| dashboard.clear_compare()>
                            "×"
                        </button>
                    </span>
                </Show>
                <button
                    class="toolbar-btn"
                    disabled=move || active_count() == 0
                    on:click=move |_| dashboard.dispatch(FilterCommand::ClearFilters)
                >
                    "Clear filters"
                </button>
            </div>
        </header>
    }
}
