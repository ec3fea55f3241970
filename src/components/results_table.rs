use gamepulse_core::filters::fields::{ColumnId, SortOrder};
use gamepulse_core::scale::format_compact;
use gamepulse_core::{FilterCommand, ResultRow, MAX_SELECTION};
use leptos::prelude::*;
use serde_json::Value;

use crate::app::Dashboard;

fn format_cell(column: ColumnId, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => (if *b { "Yes" } else { "No" }).to_string(),
        Some(Value::Number(n)) => {
            let n = n.as_f64().unwrap_or_default();
            match column {
                ColumnId::Ccu | ColumnId::Owners | ColumnId::Reviews => format_compact(n),
                ColumnId::Price => format!("${:.2}", n),
                ColumnId::Discount | ColumnId::ActivePct => format!("{}%", n),
                ColumnId::Growth7d | ColumnId::Growth30d | ColumnId::Momentum => format!("{:+.1}%", n),
                _ => n.to_string(),
            }
        }
        Some(other) => other.to_string(),
    }
}

#[component]
pub fn ResultsTable() -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let columns = move || dashboard.state.with(|s| s.visible_columns.clone());
    let visible_ids = move || {
        dashboard
            .results
            .with(|r| r.as_ref().map(|r| r.row_ids()).unwrap_or_default())
    };
    // (position, selection slot, row); slots index into `visible_ids()`
    let rows = move || {
        dashboard.results.with(|r| {
            r.as_ref()
                .map(|r| {
                    r.selection_slots()
                        .into_iter()
                        .zip(r.rows.iter().cloned())
                        .enumerate()
                        .map(|(position, (slot, row))| (position, slot, row))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let page_info = move || {
        dashboard.state.with(|s| {
            let shown = dashboard.results.with(|r| r.as_ref().map(|r| r.rows.len()).unwrap_or(0));
            (s.offset, s.limit, shown)
        })
    };
    let previous_offset = move || dashboard.state.with(|s| s.previous_page_offset());
    let next_offset = move || dashboard.state.with(|s| s.next_page_offset());

    let header = move || {
        columns()
            .into_iter()
            .map(|column| {
                let sort = column.sort_field();
                let indicator = move || {
                    dashboard.state.with(|s| match sort {
                        Some(field) if s.sort == field => match s.order {
                            SortOrder::Asc => " ▲",
                            SortOrder::Desc => " ▼",
                        },
                        _ => "",
                    })
                };
                view! {
                    <th
                        class:sortable=sort.is_some()
                        on:click=move |_| {
                            if let Some(field) = sort {
                                dashboard.dispatch(FilterCommand::SetSort(field));
                            }
                        }
                    >
                        {column.label()}
                        {indicator}
                    </th>
                }
            })
            .collect_view()
    };

    let row_view = move |(_, slot, row): (usize, Option<(usize, u64)>, ResultRow)| {
        let id = slot.map(|(_, id)| id);
        let app_id = id.and_then(|id| u32::try_from(id).ok());
        let cells = columns()
            .into_iter()
            .map(|column| view! { <td>{format_cell(column, row.get(column.as_param()))}</td> })
            .collect_view();

        view! {
            <tr class:selected=move || id.is_some_and(|id| dashboard.selection.with(|s| s.contains(id)))>
                <td class="select-cell">
                    {slot.map(|(index, id)| view! {
                        <input
                            type="checkbox"
                            prop:checked=move || dashboard.selection.with(|s| s.contains(id))
                            on:click=move |ev| {
                                let visible = visible_ids();
                                let shift = ev.shift_key();
                                dashboard.selection.update(|s| s.toggle(id, index, &visible, shift));
                            }
                        />
                    })}
                </td>
                {cells}
                <td class="compare-cell">
                    {app_id.map(|app_id| view! {
                        <button
                            class="compare-btn"
                            class:active=move || dashboard.compare.with(|c| c.contains(app_id))
                            title="Compare"
                            on:click=move |_| dashboard.toggle_compare(app_id)
                        >
                            "⇄"
                        </button>
                    })}
                </td>
            </tr>
        }
    };

    view! {
        <section class="results">
            <Show when=move || dashboard.error.with(|e| e.is_some())>
                <div class="results-error">
                    <span>{move || dashboard.error.get().unwrap_or_default()}</span>
                    <button class="retry-btn" on:click=move |_| dashboard.retry()>"Retry"</button>
                </div>
            </Show>

            <div class="results-status">
                <Show when=move || dashboard.loading.get()>
                    <span class="loading">"Loading..."</span>
                </Show>
                <Show when=move || !dashboard.selection.with(|s| s.is_empty())>
                    <span class="selection-count">
                        {move || {
                            let count = dashboard.selection.with(|s| s.len());
                            if count >= MAX_SELECTION {
                                format!("{} selected (max)", count)
                            } else {
                                format!("{} selected", count)
                            }
                        }}
                    </span>
                    <button class="selection-clear" on:click=move |_| dashboard.selection.update(|s| s.clear())>
                        "Clear selection"
                    </button>
                </Show>
            </div>

            <table class="results-table" class:loading=move || dashboard.loading.get()>
                <thead>
                    <tr>
                        <th class="select-cell">
                            <input
                                type="checkbox"
                                prop:checked=move || {
                                    let visible = visible_ids();
                                    dashboard.selection.with(|s| s.is_all_selected(&visible))
                                }
                                prop:indeterminate=move || {
                                    let visible = visible_ids();
                                    dashboard.selection.with(|s| s.is_indeterminate(&visible))
                                }
                                on:click=move |_| {
                                    let visible = visible_ids();
                                    dashboard.selection.update(|s| s.select_all_visible(&visible));
                                }
                            />
                        </th>
                        {header}
                        <th class="compare-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=rows key=|(position, slot, _)| (*position, *slot) children=row_view />
                </tbody>
            </table>

            <Show when=move || !dashboard.loading.get() && dashboard.results.with(|r| r.as_ref().is_some_and(|r| r.rows.is_empty()))>
                <div class="results-empty">"No games match these filters"</div>
            </Show>

            <div class="pagination">
                <button
                    disabled=move || page_info().0 == 0
                    on:click=move |_| dashboard.dispatch(FilterCommand::SetPage { offset: previous_offset() })
                >
                    "Previous"
                </button>
                <span class="page-range">
                    {move || {
                        let (offset, _, shown) = page_info();
                        if shown == 0 {
                            "-".to_string()
                        } else {
                            format!("{}-{}", offset.saturating_add(1), (offset as usize).saturating_add(shown))
                        }
                    }}
                </span>
                <button
                    disabled=move || {
                        let (_, limit, shown) = page_info();
                        shown < limit as usize
                    }
                    on:click=move |_| dashboard.dispatch(FilterCommand::SetPage { offset: next_offset() })
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}
