//! Default values shared by `FilterState::default()`, the URL encoder and the
//! URL decoder
//!
//! Required fields fall back to these values when absent from the URL;
//! optional filters default to "unconstrained" and have no entry here.

use super::fields::{AppType, ColumnId, MultiMode, SortField, SortOrder};

pub const DEFAULT_TYPE: AppType = AppType::Game;
pub const DEFAULT_SORT: SortField = SortField::CcuPeak;
pub const DEFAULT_ORDER: SortOrder = SortOrder::Desc;
pub const DEFAULT_LIMIT: u32 = 50;
pub const DEFAULT_OFFSET: u32 = 0;
pub const MAX_LIMIT: u32 = 200;
pub const MAX_DISCOUNT: u32 = 100;

/// Adding ids to a facet narrows results unless the user opts into `any`.
pub const DEFAULT_MULTI_MODE: MultiMode = MultiMode::All;

/// Columns shown when the URL carries no `columns` key
pub const DEFAULT_COLUMNS: &[ColumnId] = &[
    ColumnId::Name,
    ColumnId::Publisher,
    ColumnId::Ccu,
    ColumnId::Owners,
    ColumnId::Reviews,
    ColumnId::Score,
    ColumnId::Price,
    ColumnId::Growth7d,
    ColumnId::Release,
];
