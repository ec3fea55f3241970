use gamepulse_core::presets;
use gamepulse_core::{FilterCommand, PresetGroup};
use leptos::prelude::*;

use crate::app::Dashboard;

/// Quick-pick buttons for a preset group. Clicking the active preset clears it.
#[component]
pub fn PresetBar(group: PresetGroup) -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let buttons = group
        .presets()
        .iter()
        .map(|preset| {
            let id = preset.id;
            view! {
                <button
                    class="preset-btn"
                    class:active=move || dashboard.state.with(|s| presets::is_preset_active(s, group, id))
                    on:click=move |_| dashboard.dispatch(FilterCommand::TogglePreset { group, preset: id })
                >
                    {id.label()}
                </button>
            }
        })
        .collect_view();

    view! { <div class="preset-bar">{buttons}</div> }
}
