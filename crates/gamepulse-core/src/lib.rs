//! GamePulse core library
//!
//! The filter state engine behind the GamePulse games dashboard: a typed
//! filter model, its URL codec, interaction controllers for range sliders,
//! row selection and debounced search, and the remote query boundary.
//! Everything except `client` is pure and compiles for `wasm32`.

pub mod commands;
pub mod controller;
pub mod debounce;
pub mod filters;
pub mod presets;
pub mod query;
pub mod range_slider;
pub mod scale;
pub mod selection;
pub mod url;

#[cfg(feature = "client")]
pub mod client;

pub use commands::{FilterCommand, reduce};
pub use controller::{Commit, CommitId, FilterController};
pub use debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use filters::{FilterState, MultiSelect, Range};
pub use presets::{PresetGroup, PresetId};
pub use query::{AggregateStats, QueryConfig, QueryError, QueryRequest, QueryResults, ResultRow};
pub use range_slider::{RangeCommit, RangeSelectionController, Thumb};
pub use selection::{MAX_SELECTION, SelectionManager};
pub use url::{CompareSet, QueryParams};

#[cfg(feature = "client")]
pub use client::QueryClient;
