use gamepulse_core::filters::fields::RangeField;
use gamepulse_core::{FilterCommand, RangeCommit, RangeSelectionController, Thumb};
use leptos::html;
use leptos::prelude::*;
use web_sys::{PointerEvent, console};

use crate::app::Dashboard;

/// Dual-thumb slider with a text box per bound. Dragging only updates the
/// local controller; the range is committed on release, click or text entry.
#[component]
pub fn RangeFilter(field: RangeField) -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();
    let control = RwSignal::new(RangeSelectionController::new(
        field,
        dashboard.state.with_untracked(|s| s.range(field)),
    ));
    let track_ref = NodeRef::<html::Div>::new();
    let min_only = field.is_min_only();

    Effect::new(move || {
        let committed = dashboard.state.with(|s| s.range(field));
        control.update(|c| c.sync_committed(committed));
    });

    let commit = move |range: Option<RangeCommit>| {
        if let Some(range) = range {
            dashboard.dispatch(FilterCommand::SetRange {
                field,
                min: range.min,
                max: range.max,
            });
        }
    };

    // Pointer position as a fraction of the track width
    let position_of = move |ev: &PointerEvent| -> Option<f64> {
        let track = track_ref.get()?;
        let rect = track.get_bounding_client_rect();
        if rect.width() <= 0.0 {
            return None;
        }
        Some((ev.client_x() as f64 - rect.left()) / rect.width())
    };

    let start_drag = move |thumb: Thumb, ev: PointerEvent| {
        ev.stop_propagation();
        ev.prevent_default();
        if let Some(track) = track_ref.get() {
            if let Err(e) = track.set_pointer_capture(ev.pointer_id()) {
                console::warn_1(&format!("Pointer capture failed: {:?}", e).into());
            }
        }
        control.update(|c| c.pointer_down(thumb));
    };

    let on_track_down = move |ev: PointerEvent| {
        if control.with_untracked(|c| c.is_dragging()) {
            return;
        }
        if let Some(position) = position_of(&ev) {
            let mut range = None;
            control.update(|c| range = c.track_click(position));
            commit(range);
        }
    };

    let on_move = move |ev: PointerEvent| {
        if !control.with_untracked(|c| c.is_dragging()) {
            return;
        }
        if let Some(position) = position_of(&ev) {
            control.update(|c| c.pointer_move(position));
        }
    };

    let on_up = move |_: PointerEvent| {
        let mut range = None;
        control.update(|c| range = c.pointer_up());
        commit(range);
    };

    let text_box = move |thumb: Thumb| {
        view! {
            <input
                type="text"
                class="range-input"
                placeholder=move || if thumb == Thumb::Min { "min" } else { "max" }
                prop:value=move || control.with(|c| c.text_value(thumb))
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    let mut range = None;
                    control.update(|c| range = c.text_input(thumb, &text));
                    commit(range);
                }
                on:blur=move |_| control.update(|c| c.text_blur(thumb))
            />
        }
    };

    let thumb_style = move |thumb: Thumb| {
        control.with(|c| {
            let (min, max) = c.display_positions();
            let position = if thumb == Thumb::Min { min } else { max };
            format!("left: {:.2}%", position * 100.0)
        })
    };

    let fill_style = move || {
        control.with(|c| {
            let (min, max) = c.display_positions();
            let max = if min_only { 1.0 } else { max };
            format!("left: {:.2}%; width: {:.2}%", min * 100.0, (max - min).max(0.0) * 100.0)
        })
    };

    view! {
        <div class="range-filter" class:dragging=move || control.with(|c| c.is_dragging())>
            <div class="range-header">
                <span class="range-label">{field.label()}</span>
                <Show when=move || !dashboard.state.with(|s| s.range(field).is_unbounded())>
                    <button
                        class="range-reset"
                        title="Reset"
                        on:click=move |_| dashboard.dispatch(FilterCommand::SetRange { field, min: None, max: None })
                    >
                        "×"
                    </button>
                </Show>
            </div>
            <div
                class="range-track"
                node_ref=track_ref
                on:pointerdown=on_track_down
                on:pointermove=on_move
                on:pointerup=on_up
                on:pointercancel=move |_| control.update(|c| c.pointer_cancel())
            >
                <div class="range-fill" style=fill_style></div>
                <div
                    class="range-thumb"
                    class:active=move || control.with(|c| c.dragging_thumb() == Some(Thumb::Min))
                    style=move || thumb_style(Thumb::Min)
                    on:pointerdown=move |ev| start_drag(Thumb::Min, ev)
                ></div>
                <Show when=move || !min_only>
                    <div
                        class="range-thumb"
                        class:active=move || control.with(|c| c.dragging_thumb() == Some(Thumb::Max))
                        style=move || thumb_style(Thumb::Max)
                        on:pointerdown=move |ev| start_drag(Thumb::Max, ev)
                    ></div>
                </Show>
            </div>
            <div class="range-inputs">
                {text_box(Thumb::Min)}
                <Show when=move || !min_only>
                    <span class="range-sep">"-"</span>
                    {text_box(Thumb::Max)}
                </Show>
            </div>
        </div>
    }
}
