use gamepulse_core::filters::fields::{
    CcuTier, ControllerSupport, MultiField, MultiMode, PublisherSize, RangeField, SteamDeck,
    TriStateField, VelocityTier,
};
use gamepulse_core::scale::parse_smart_value;
use gamepulse_core::{FilterCommand, FilterState, PresetGroup};
use leptos::prelude::*;

use super::{PresetBar, RangeFilter};
use crate::app::Dashboard;

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar">
            <Section title="Metrics">
                <RangeFilter field=RangeField::Ccu />
                <RangeFilter field=RangeField::Owners />
                <RangeFilter field=RangeField::Reviews />
                <RangeFilter field=RangeField::Score />
                <RangeFilter field=RangeField::Price />
                <RangeFilter field=RangeField::Playtime />
                <TriStateSelect field=TriStateField::IsFree />
                <TextFilter
                    label="Min discount %"
                    current=|s| s.min_discount.map(|d| d.to_string())
                    command=|text| FilterCommand::SetMinDiscount(text.trim().parse().ok())
                />
            </Section>

            <Section title="Growth">
                <PresetBar group=PresetGroup::Growth7d />
                <RangeFilter field=RangeField::Growth7d />
                <PresetBar group=PresetGroup::Growth30d />
                <RangeFilter field=RangeField::Growth30d />
                <PresetBar group=PresetGroup::Momentum />
                <RangeFilter field=RangeField::Momentum />
            </Section>

            <Section title="Sentiment">
                <PresetBar group=PresetGroup::SentimentDelta />
                <RangeFilter field=RangeField::SentimentDelta />
                {enum_select(
                    "Velocity",
                    VelocityTier::ALL,
                    VelocityTier::as_param,
                    VelocityTier::from_param,
                    |s| s.velocity_tier,
                    FilterCommand::SetVelocityTier,
                )}
            </Section>

            <Section title="Engagement">
                <RangeFilter field=RangeField::ActivePct />
                <RangeFilter field=RangeField::ReviewRate />
                <RangeFilter field=RangeField::ValueScore />
            </Section>

            <Section title="Content">
                <IdFilter facet=IdFacet::Multi(MultiField::Genres) />
                <IdFilter facet=IdFacet::Multi(MultiField::Tags) />
                <IdFilter facet=IdFacet::Categories />
                <TriStateSelect field=TriStateField::HasWorkshop />
            </Section>

            <Section title="Platform">
                <IdFilter facet=IdFacet::Multi(MultiField::Platforms) />
                {enum_select(
                    "Steam Deck",
                    SteamDeck::ALL,
                    SteamDeck::as_param,
                    SteamDeck::from_param,
                    |s| s.steam_deck,
                    FilterCommand::SetSteamDeck,
                )}
                {enum_select(
                    "Controller",
                    ControllerSupport::ALL,
                    ControllerSupport::as_param,
                    ControllerSupport::from_param,
                    |s| s.controller,
                    FilterCommand::SetController,
                )}
            </Section>

            <Section title="Release">
                <RangeFilter field=RangeField::Age />
                <RangeFilter field=RangeField::Hype />
                <TextFilter
                    label="Release year"
                    current=|s| s.release_year.map(|y| y.to_string())
                    command=|text| FilterCommand::SetReleaseYear(text.trim().parse().ok())
                />
                <TriStateSelect field=TriStateField::EarlyAccess />
            </Section>

            <Section title="Publisher">
                <TextFilter
                    label="Publisher"
                    current=|s| s.publisher_search.clone()
                    command=|text| FilterCommand::SetPublisherSearch(Some(text))
                />
                <TextFilter
                    label="Developer"
                    current=|s| s.developer_search.clone()
                    command=|text| FilterCommand::SetDeveloperSearch(Some(text))
                />
                <TriStateSelect field=TriStateField::SelfPublished />
                {enum_select(
                    "Publisher size",
                    PublisherSize::ALL,
                    PublisherSize::as_param,
                    PublisherSize::from_param,
                    |s| s.publisher_size,
                    FilterCommand::SetPublisherSize,
                )}
                <TextFilter
                    label="Min vs publisher avg"
                    current=|s| s.min_vs_publisher.map(|v| v.to_string())
                    command=|text| FilterCommand::SetMinVsPublisher(parse_smart_value(&text))
                />
            </Section>

            <Section title="Activity">
                {enum_select(
                    "CCU tier",
                    CcuTier::ALL,
                    CcuTier::as_param,
                    CcuTier::from_param,
                    |s| s.ccu_tier,
                    FilterCommand::SetCcuTier,
                )}
            </Section>
        </aside>
    }
}

#[component]
fn Section(title: &'static str, children: Children) -> impl IntoView {
    let (open, set_open) = signal(true);

    view! {
        <div class="sidebar-section">
            <h3 class="section-title" on:click=move |_| set_open.update(|o| *o = !*o)>
                {title}
            </h3>
            <div class="section-body" class:collapsed=move || !open.get()>
                {children()}
            </div>
        </div>
    }
}

// ============================================================================
// Simple controls
// ============================================================================

#[component]
fn TriStateSelect(field: TriStateField) -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    let current = move || match dashboard.state.with(|s| s.tri_state(field)) {
        Some(true) => "yes",
        Some(false) => "no",
        None => "",
    };

    view! {
        <label class="filter-select">
            <span>{field.label()}</span>
            <select
                prop:value=current
                on:change=move |ev| {
                    let value = match event_target_value(&ev).as_str() {
                        "yes" => Some(true),
                        "no" => Some(false),
                        _ => None,
                    };
                    dashboard.dispatch(FilterCommand::SetTriState { field, value });
                }
            >
                <option value="">"Any"</option>
                <option value="yes">"Yes"</option>
                <option value="no">"No"</option>
            </select>
        </label>
    }
}

/// `<select>` over a closed value set plus "Any"
fn enum_select<T>(
    label: &'static str,
    options: &'static [T],
    as_param: fn(T) -> &'static str,
    from_param: fn(&str) -> Option<T>,
    current: fn(&FilterState) -> Option<T>,
    command: fn(Option<T>) -> FilterCommand,
) -> impl IntoView
where
    T: Copy + Send + Sync + 'static,
{
    let dashboard = expect_context::<Dashboard>();

    view! {
        <label class="filter-select">
            <span>{label}</span>
            <select
                prop:value=move || dashboard.state.with(|s| current(s).map(as_param).unwrap_or(""))
                on:change=move |ev| dashboard.dispatch(command(from_param(&event_target_value(&ev))))
            >
                <option value="">"Any"</option>
                {options
                    .iter()
                    .map(|option| {
                        let value = as_param(*option);
                        view! { <option value=value>{value}</option> }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Free-form input committed on change (blur or Enter). An empty box clears
/// the filter.
#[component]
fn TextFilter(
    label: &'static str,
    current: fn(&FilterState) -> Option<String>,
    command: fn(String) -> FilterCommand,
) -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();

    view! {
        <label class="filter-input">
            <span>{label}</span>
            <input
                type="text"
                prop:value=move || dashboard.state.with(|s| current(s).unwrap_or_default())
                on:change=move |ev| dashboard.dispatch(command(event_target_value(&ev)))
            />
        </label>
    }
}

// ============================================================================
// Id lists
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum IdFacet {
    Multi(MultiField),
    Categories,
}

impl IdFacet {
    fn label(self) -> &'static str {
        match self {
            IdFacet::Multi(MultiField::Genres) => "Genres",
            IdFacet::Multi(MultiField::Tags) => "Tags",
            IdFacet::Multi(MultiField::Platforms) => "Platforms",
            IdFacet::Categories => "Categories",
        }
    }

    fn ids(self, state: &FilterState) -> Vec<u32> {
        match self {
            IdFacet::Multi(field) => state.multi(field).ids.clone(),
            IdFacet::Categories => state.categories.clone(),
        }
    }

    fn toggle(self, id: u32) -> FilterCommand {
        match self {
            IdFacet::Multi(field) => FilterCommand::ToggleMultiId { field, id },
            IdFacet::Categories => FilterCommand::ToggleCategory(id),
        }
    }
}

/// Selected ids as removable chips, an input to add one, and the any/all
/// combinator for facets that have it.
#[component]
fn IdFilter(facet: IdFacet) -> impl IntoView {
    let dashboard = expect_context::<Dashboard>();
    let ids = move || dashboard.state.with(|s| facet.ids(s));

    let mode_toggle = match facet {
        IdFacet::Multi(field) => {
            let mode = move || dashboard.state.with(|s| s.multi(field).mode);
            Some(view! {
                <div class="mode-toggle">
                    <button
                        class:active=move || mode() == MultiMode::Any
                        on:click=move |_| dashboard.dispatch(FilterCommand::SetMultiMode { field, mode: MultiMode::Any })
                    >
                        "Any"
                    </button>
                    <button
                        class:active=move || mode() == MultiMode::All
                        on:click=move |_| dashboard.dispatch(FilterCommand::SetMultiMode { field, mode: MultiMode::All })
                    >
                        "All"
                    </button>
                </div>
            })
        }
        IdFacet::Categories => None,
    };

    view! {
        <div class="id-filter">
            <div class="id-filter-header">
                <span>{facet.label()}</span>
                {mode_toggle}
            </div>
            <div class="id-chips">
                <For
                    each=ids
                    key=|id| *id
                    children=move |id| {
                        view! {
                            <span class="id-chip">
                                {id}
                                <button class="chip-remove" on:click=move |_| dashboard.dispatch(facet.toggle(id))>
                                    "×"
                                </button>
                            </span>
                        }
                    }
                />
            </div>
            <input
                type="text"
                class="id-add"
                placeholder="Add id"
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    if let Ok(id) = text.trim().parse::<u32>() {
                        if !dashboard.state.with_untracked(|s| facet.ids(s).contains(&id)) {
                            dashboard.dispatch(facet.toggle(id));
                        }
                    }
                    event_target::<web_sys::HtmlInputElement>(&ev).set_value("");
                }
            />
        </div>
    }
}
