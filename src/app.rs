use gamepulse_core::{
    Commit, CompareSet, FilterCommand, FilterController, FilterState, QueryConfig, QueryResults, SelectionManager,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::console;

use crate::api;
use crate::components::{ResultsTable, Sidebar, Toolbar};
use crate::url_sync::{self, HistoryMode};

/// Shared dashboard handles, provided as context to every component
#[derive(Clone, Copy)]
pub struct Dashboard {
    controller: StoredValue<FilterController>,
    config: StoredValue<QueryConfig>,
    /// Committed filter state; only `dispatch` and navigation write it
    pub state: RwSignal<FilterState>,
    pub compare: RwSignal<CompareSet>,
    pub results: RwSignal<Option<QueryResults>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub selection: RwSignal<SelectionManager>,
}

impl Dashboard {
    fn new(controller: FilterController, config: QueryConfig) -> Self {
        Self {
            state: RwSignal::new(controller.state().clone()),
            compare: RwSignal::new(controller.compare().clone()),
            controller: StoredValue::new(controller),
            config: StoredValue::new(config),
            results: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            selection: RwSignal::new(SelectionManager::new()),
        }
    }

    /// Apply a filter command; unchanged states are not re-queried.
    pub fn dispatch(&self, command: FilterCommand) {
        let mut commit = None;
        self.controller.update_value(|controller| commit = controller.dispatch(command));
        if let Some(commit) = commit {
            self.apply(commit, HistoryMode::Push);
        }
    }

    pub fn toggle_compare(&self, app_id: u32) {
        let mut changed = false;
        self.controller.update_value(|controller| changed = controller.toggle_compare(app_id));
        if changed {
            self.sync_compare();
        }
    }

    pub fn clear_compare(&self) {
        self.controller.update_value(|controller| controller.clear_compare());
        self.sync_compare();
    }

    /// Back/forward navigation
    fn navigate(&self, search: &str) {
        let mut commit = None;
        self.controller.update_value(|controller| commit = Some(controller.navigate(search)));
        if let Some(commit) = commit {
            self.compare.set(self.controller.with_value(|c| c.compare().clone()));
            self.apply(commit, HistoryMode::Replace);
        }
    }

    fn sync_compare(&self) {
        let (compare, search) = self
            .controller
            .with_value(|c| (c.compare().clone(), c.location_search()));
        self.compare.set(compare);
        url_sync::write_search(&search, HistoryMode::Replace);
    }

    fn apply(&self, commit: Commit, history: HistoryMode) {
        let display_only = self.state.with_untracked(|s| s.same_query(&commit.state));
        self.state.set(commit.state.clone());
        let search = self.controller.with_value(|c| c.location_search());
        url_sync::write_search(&search, history);

        // Column toggles keep the current rows, unless a fetch is in flight
        // (its results would be dropped as stale)
        if display_only && !self.loading.get_untracked() && self.results.with_untracked(|r| r.is_some()) {
            return;
        }
        self.fetch(commit);
    }

    /// Query rows and stats for a commit. Results that arrive after a newer
    /// commit are dropped.
    fn fetch(&self, commit: Commit) {
        let dashboard = *self;
        let config = self.config.get_value();
        self.loading.set(true);
        self.error.set(None);

        spawn_local(async move {
            let result = api::run_query(&config, &commit.state).await;

            if !dashboard.controller.with_value(|c| c.is_current(commit.id)) {
                console::log_1(&format!("Dropping stale results for commit {}", commit.id).into());
                return;
            }
            match result {
                Ok(results) => dashboard.results.set(Some(results)),
                Err(e) => {
                    console::error_1(&format!("Query failed: {}", e).into());
                    dashboard.error.set(Some(e.user_message()));
                }
            }
            dashboard.loading.set(false);
        });
    }

    /// Re-run the current query (after an error)
    pub fn retry(&self) {
        let commit = self.controller.with_value(|c| Commit {
            id: c.current_id(),
            state: c.state().clone(),
            query: c.query_string().to_string(),
        });
        self.fetch(commit);
    }
}

#[component]
pub fn App() -> impl IntoView {
    let initial = FilterController::from_query(&url_sync::current_search());
    let dashboard = Dashboard::new(initial, api::config());
    provide_context(dashboard);

    // Canonicalize the address bar and run the first query
    url_sync::write_search(
        &dashboard.controller.with_value(|c| c.location_search()),
        HistoryMode::Replace,
    );
    dashboard.retry();

    url_sync::on_navigation(move |search| dashboard.navigate(&search));

    view! {
        <div class="app-container">
            <Toolbar />
            <div class="main-content">
                <Sidebar />
                <ResultsTable />
            </div>
        </div>
    }
}
