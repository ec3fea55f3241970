//! Typed filter model for the games table
//!
//! `FilterState` is the single source of truth for what the dashboard shows.
//! Every optional field uses `None` for "no constraint", which is distinct
//! from a present boundary value such as `Some(0.0)`.

pub mod defaults;
pub mod fields;
mod summary;

use serde::{Deserialize, Serialize};

use defaults::{
    DEFAULT_COLUMNS, DEFAULT_LIMIT, DEFAULT_MULTI_MODE, DEFAULT_OFFSET, DEFAULT_ORDER,
    DEFAULT_SORT, DEFAULT_TYPE,
};
use fields::{
    AppType, CcuTier, ColumnId, ControllerSupport, MultiField, MultiMode, PublisherSize,
    RangeField, SortField, SortOrder, SteamDeck, TriStateField, VelocityTier,
};

/// Independent lower/upper bound pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Range {
    pub const UNBOUNDED: Range = Range { min: None, max: None };

    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Build a range, dropping non-finite bounds and raising `max` to `min`
    /// when the two are out of order.
    pub fn clamped(min: Option<f64>, max: Option<f64>) -> Self {
        let min = min.filter(|v| v.is_finite());
        let max = max.filter(|v| v.is_finite());
        let max = match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Some(lo),
            _ => max,
        };
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Selected ids of a facet plus the combinator applied across them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSelect {
    pub ids: Vec<u32>,
    pub mode: MultiMode,
}

impl Default for MultiSelect {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            mode: DEFAULT_MULTI_MODE,
        }
    }
}

impl MultiSelect {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Every filter, sort and paging parameter of the games table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    #[serde(rename = "type")]
    pub app_type: AppType,
    pub sort: SortField,
    pub order: SortOrder,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,

    // Metrics
    pub ccu: Range,
    pub owners: Range,
    pub reviews: Range,
    pub score: Range,
    pub price: Range,
    pub playtime: Range,
    pub is_free: Option<bool>,
    pub min_discount: Option<u32>,

    // Growth
    pub growth_7d: Range,
    pub growth_30d: Range,
    pub momentum: Range,

    // Sentiment
    pub sentiment_delta: Range,
    pub velocity_tier: Option<VelocityTier>,

    // Engagement (min-only)
    pub active_pct: Range,
    pub review_rate: Range,
    pub value_score: Range,

    // Content
    pub genres: MultiSelect,
    pub tags: MultiSelect,
    pub categories: Vec<u32>,
    pub has_workshop: Option<bool>,

    // Platform
    pub platforms: MultiSelect,
    pub steam_deck: Option<SteamDeck>,
    pub controller: Option<ControllerSupport>,

    // Release
    pub age: Range,
    pub release_year: Option<i32>,
    pub early_access: Option<bool>,
    pub hype: Range,

    // Relationship
    pub publisher_search: Option<String>,
    pub developer_search: Option<String>,
    pub self_published: Option<bool>,
    pub publisher_size: Option<PublisherSize>,
    pub min_vs_publisher: Option<f64>,

    // Activity
    pub ccu_tier: Option<CcuTier>,

    pub visible_columns: Vec<ColumnId>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            app_type: DEFAULT_TYPE,
            sort: DEFAULT_SORT,
            order: DEFAULT_ORDER,
            search: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            ccu: Range::UNBOUNDED,
            owners: Range::UNBOUNDED,
            reviews: Range::UNBOUNDED,
            score: Range::UNBOUNDED,
            price: Range::UNBOUNDED,
            playtime: Range::UNBOUNDED,
            is_free: None,
            min_discount: None,
            growth_7d: Range::UNBOUNDED,
            growth_30d: Range::UNBOUNDED,
            momentum: Range::UNBOUNDED,
            sentiment_delta: Range::UNBOUNDED,
            velocity_tier: None,
            active_pct: Range::UNBOUNDED,
            review_rate: Range::UNBOUNDED,
            value_score: Range::UNBOUNDED,
            genres: MultiSelect::default(),
            tags: MultiSelect::default(),
            categories: Vec::new(),
            has_workshop: None,
            platforms: MultiSelect::default(),
            steam_deck: None,
            controller: None,
            age: Range::UNBOUNDED,
            release_year: None,
            early_access: None,
            hype: Range::UNBOUNDED,
            publisher_search: None,
            developer_search: None,
            self_published: None,
            publisher_size: None,
            min_vs_publisher: None,
            ccu_tier: None,
            visible_columns: DEFAULT_COLUMNS.to_vec(),
        }
    }
}

impl FilterState {
    pub fn range(&self, field: RangeField) -> Range {
        match field {
            RangeField::Ccu => self.ccu,
            RangeField::Owners => self.owners,
            RangeField::Reviews => self.reviews,
            RangeField::Score => self.score,
            RangeField::Price => self.price,
            RangeField::Playtime => self.playtime,
            RangeField::Growth7d => self.growth_7d,
            RangeField::Growth30d => self.growth_30d,
            RangeField::Momentum => self.momentum,
            RangeField::SentimentDelta => self.sentiment_delta,
            RangeField::ActivePct => self.active_pct,
            RangeField::ReviewRate => self.review_rate,
            RangeField::ValueScore => self.value_score,
            RangeField::Age => self.age,
            RangeField::Hype => self.hype,
        }
    }

    pub fn range_mut(&mut self, field: RangeField) -> &mut Range {
        match field {
            RangeField::Ccu => &mut self.ccu,
            RangeField::Owners => &mut self.owners,
            RangeField::Reviews => &mut self.reviews,
            RangeField::Score => &mut self.score,
            RangeField::Price => &mut self.price,
            RangeField::Playtime => &mut self.playtime,
            RangeField::Growth7d => &mut self.growth_7d,
            RangeField::Growth30d => &mut self.growth_30d,
            RangeField::Momentum => &mut self.momentum,
            RangeField::SentimentDelta => &mut self.sentiment_delta,
            RangeField::ActivePct => &mut self.active_pct,
            RangeField::ReviewRate => &mut self.review_rate,
            RangeField::ValueScore => &mut self.value_score,
            RangeField::Age => &mut self.age,
            RangeField::Hype => &mut self.hype,
        }
    }

    pub fn multi(&self, field: MultiField) -> &MultiSelect {
        match field {
            MultiField::Genres => &self.genres,
            MultiField::Tags => &self.tags,
            MultiField::Platforms => &self.platforms,
        }
    }

    pub fn multi_mut(&mut self, field: MultiField) -> &mut MultiSelect {
        match field {
            MultiField::Genres => &mut self.genres,
            MultiField::Tags => &mut self.tags,
            MultiField::Platforms => &mut self.platforms,
        }
    }

    pub fn tri_state(&self, field: TriStateField) -> Option<bool> {
        match field {
            TriStateField::IsFree => self.is_free,
            TriStateField::HasWorkshop => self.has_workshop,
            TriStateField::EarlyAccess => self.early_access,
            TriStateField::SelfPublished => self.self_published,
        }
    }

    pub fn tri_state_mut(&mut self, field: TriStateField) -> &mut Option<bool> {
        match field {
            TriStateField::IsFree => &mut self.is_free,
            TriStateField::HasWorkshop => &mut self.has_workshop,
            TriStateField::EarlyAccess => &mut self.early_access,
            TriStateField::SelfPublished => &mut self.self_published,
        }
    }

    /// Reset every filter while keeping the view configuration
    /// (type, sort, order, page size and columns).
    pub fn cleared(&self) -> Self {
        Self {
            app_type: self.app_type,
            sort: self.sort,
            order: self.order,
            limit: self.limit,
            visible_columns: self.visible_columns.clone(),
            ..Self::default()
        }
    }

    /// Whether both states ask the remote side for the same rows. Column
    /// visibility is display-only.
    pub fn same_query(&self, other: &FilterState) -> bool {
        let mut this = self.clone();
        this.visible_columns.clone_from(&other.visible_columns);
        this == *other
    }

    /// Offset of the previous page
    pub fn previous_page_offset(&self) -> u32 {
        self.offset.saturating_sub(self.limit)
    }

    /// Offset of the next page
    pub fn next_page_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }
}
