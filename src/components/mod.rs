mod preset_bar;
mod range_filter;
mod results_table;
mod search_box;
mod sidebar;
mod toolbar;

pub use preset_bar::PresetBar;
pub use range_filter::RangeFilter;
pub use results_table::ResultsTable;
pub use search_box::SearchBox;
pub use sidebar::Sidebar;
pub use toolbar::Toolbar;
