//! Filter mutations and the pure reducer that applies them
//!
//! Every change to `FilterState` is expressed as a `FilterCommand` so the UI,
//! the CLI and tests all go through one code path. `reduce` never fails: out
//! of range input is clamped and blank text becomes "no constraint".

use serde::{Deserialize, Serialize};

use crate::filters::defaults::{DEFAULT_COLUMNS, DEFAULT_MULTI_MODE, DEFAULT_ORDER, MAX_DISCOUNT, MAX_LIMIT};
use crate::filters::fields::{
    AppType, CcuTier, ColumnId, ControllerSupport, MultiField, MultiMode, PublisherSize, RangeField,
    SortField, SortOrder, SteamDeck, TriStateField, VelocityTier,
};
use crate::filters::{FilterState, Range};
use crate::presets::{self, PresetGroup, PresetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum FilterCommand {
    SetType(AppType),
    /// Same field flips the order; a new field starts descending
    SetSort(SortField),
    SetOrder(SortOrder),
    SetSearch(Option<String>),
    SetRange {
        field: RangeField,
        min: Option<f64>,
        max: Option<f64>,
    },
    TogglePreset {
        group: PresetGroup,
        preset: PresetId,
    },
    ClearPreset {
        group: PresetGroup,
    },
    ToggleMultiId {
        field: MultiField,
        id: u32,
    },
    SetMultiMode {
        field: MultiField,
        mode: MultiMode,
    },
    ToggleCategory(u32),
    SetTriState {
        field: TriStateField,
        value: Option<bool>,
    },
    SetVelocityTier(Option<VelocityTier>),
    SetSteamDeck(Option<SteamDeck>),
    SetController(Option<ControllerSupport>),
    SetPublisherSize(Option<PublisherSize>),
    SetCcuTier(Option<CcuTier>),
    SetPublisherSearch(Option<String>),
    SetDeveloperSearch(Option<String>),
    SetReleaseYear(Option<i32>),
    SetMinVsPublisher(Option<f64>),
    SetMinDiscount(Option<u32>),
    SetColumns(Vec<ColumnId>),
    ToggleColumn(ColumnId),
    SetLimit(u32),
    SetPage {
        offset: u32,
    },
    ClearFilters,
}

impl FilterCommand {
    /// Whether applying this command sends the user back to the first page
    pub fn resets_page(&self) -> bool {
        !matches!(
            self,
            FilterCommand::SetPage { .. } | FilterCommand::SetColumns(_) | FilterCommand::ToggleColumn(_)
        )
    }
}

/// Apply one command, returning the next state.
pub fn reduce(state: &FilterState, command: FilterCommand) -> FilterState {
    let resets_page = command.resets_page();
    let mut next = state.clone();
    apply(&mut next, command);
    if resets_page {
        next.offset = 0;
    }
    next
}

fn apply(state: &mut FilterState, command: FilterCommand) {
    match command {
        FilterCommand::SetType(app_type) => state.app_type = app_type,
        FilterCommand::SetSort(sort) => {
            if state.sort == sort {
                state.order = state.order.flipped();
            } else {
                state.sort = sort;
                state.order = DEFAULT_ORDER;
            }
        }
        FilterCommand::SetOrder(order) => state.order = order,
        FilterCommand::SetSearch(text) => state.search = normalize_text(text),
        FilterCommand::SetRange { field, min, max } => {
            let max = if field.is_min_only() { None } else { max };
            *state.range_mut(field) = Range::clamped(min, max);
        }
        FilterCommand::ToggleMultiId { field, id } => {
            let select = state.multi_mut(field);
            toggle_id(&mut select.ids, id);
            if select.ids.is_empty() {
                select.mode = DEFAULT_MULTI_MODE;
            }
        }
        FilterCommand::SetMultiMode { field, mode } => state.multi_mut(field).mode = mode,
        FilterCommand::ToggleCategory(id) => toggle_id(&mut state.categories, id),
        FilterCommand::SetTriState { field, value } => *state.tri_state_mut(field) = value,
        FilterCommand::SetVelocityTier(tier) => state.velocity_tier = tier,
        FilterCommand::SetSteamDeck(deck) => state.steam_deck = deck,
        FilterCommand::SetController(controller) => state.controller = controller,
        FilterCommand::SetPublisherSize(size) => state.publisher_size = size,
        FilterCommand::SetCcuTier(tier) => state.ccu_tier = tier,
        FilterCommand::SetPublisherSearch(text) => state.publisher_search = normalize_text(text),
        FilterCommand::SetDeveloperSearch(text) => state.developer_search = normalize_text(text),
        FilterCommand::SetReleaseYear(year) => state.release_year = year,
        FilterCommand::SetMinVsPublisher(ratio) => {
            state.min_vs_publisher = ratio.filter(|v| v.is_finite());
        }
        FilterCommand::SetMinDiscount(discount) => {
            state.min_discount = discount.map(|d| d.min(MAX_DISCOUNT));
        }
        FilterCommand::SetColumns(columns) => {
            let mut unique = Vec::with_capacity(columns.len());
            for column in columns {
                if !unique.contains(&column) {
                    unique.push(column);
                }
            }
            state.visible_columns = if unique.is_empty() {
                DEFAULT_COLUMNS.to_vec()
            } else {
                unique
            };
        }
        FilterCommand::ToggleColumn(column) => {
            if let Some(pos) = state.visible_columns.iter().position(|c| *c == column) {
                // The table always keeps at least one column
                if state.visible_columns.len() > 1 {
                    state.visible_columns.remove(pos);
                }
            } else {
                state.visible_columns.push(column);
            }
        }
        FilterCommand::SetLimit(limit) => state.limit = limit.clamp(1, MAX_LIMIT),
        FilterCommand::SetPage { offset } => state.offset = offset,
        FilterCommand::TogglePreset { group, preset } => {
            *state = presets::toggle_preset(state, group, preset);
        }
        FilterCommand::ClearPreset { group } => *state = presets::clear_preset(state, group),
        FilterCommand::ClearFilters => *state = state.cleared(),
    }
}

fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn toggle_id(ids: &mut Vec<u32>, id: u32) {
    if let Some(pos) = ids.iter().position(|existing| *existing == id) {
        ids.remove(pos);
    } else {
        ids.push(id);
    }
}
