//! Owner of the live filter state
//!
//! The controller is the only writer of `FilterState`. Every state change is
//! stamped with a fresh `CommitId`; remote results carry the id of the commit
//! that requested them and are applied only while that id is still current,
//! so a slow response can never overwrite a newer one.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::commands::{FilterCommand, reduce};
use crate::filters::FilterState;
use crate::url::{self, CompareSet, QueryParams};

/// Monotonic identity of a committed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CommitId(u64);

impl CommitId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A state change that should be reflected in the URL and re-queried
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub id: CommitId,
    pub state: FilterState,
    /// Canonical query string, without the leading `?`
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct FilterController {
    state: FilterState,
    compare: CompareSet,
    query: String,
    current: CommitId,
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterController {
    pub fn new(state: FilterState) -> Self {
        let mut controller = Self {
            state,
            compare: CompareSet::new(),
            query: String::new(),
            current: CommitId(0),
        };
        controller.query = controller.encode();
        controller
    }

    /// Start from a URL or bare query string (initial page load).
    pub fn from_query(query: &str) -> Self {
        let params = QueryParams::parse(query);
        let mut controller = Self::new(url::decode(&params));
        controller.compare = CompareSet::decode(&params);
        controller.query = controller.encode();
        controller
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn compare(&self) -> &CompareSet {
        &self.compare
    }

    /// Canonical query string for the current state, without the leading `?`
    pub fn query_string(&self) -> &str {
        &self.query
    }

    /// `?query`, or an empty string when every value is at its default
    pub fn location_search(&self) -> String {
        if self.query.is_empty() {
            String::new()
        } else {
            format!("?{}", self.query)
        }
    }

    pub fn current_id(&self) -> CommitId {
        self.current
    }

    /// Whether results requested under `id` may still be applied
    pub fn is_current(&self, id: CommitId) -> bool {
        id == self.current
    }

    /// Apply a command. Commands that leave the state unchanged produce no
    /// commit.
    pub fn dispatch(&mut self, command: FilterCommand) -> Option<Commit> {
        let next = reduce(&self.state, command);
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(self.commit())
    }

    /// Replace the state from a URL (back/forward, pasted link). Always a
    /// commit so in-flight results from before the navigation are dropped.
    pub fn navigate(&mut self, query: &str) -> Commit {
        let params = QueryParams::parse(query);
        self.state = url::decode(&params);
        self.compare = CompareSet::decode(&params);
        self.commit()
    }

    /// Add or remove an app from the compare set. Only the URL changes; the
    /// result set does not, so no commit is issued.
    pub fn toggle_compare(&mut self, app_id: u32) -> bool {
        let changed = self.compare.toggle(app_id);
        if changed {
            self.query = self.encode();
        }
        changed
    }

    pub fn clear_compare(&mut self) {
        self.compare.clear();
        self.query = self.encode();
    }

    fn commit(&mut self) -> Commit {
        self.current = CommitId(self.current.0 + 1);
        self.query = self.encode();
        debug!(
            commit = %self.current,
            query = %self.query,
            active_filters = self.state.active_filter_count(),
            "Committed filter state"
        );
        Commit {
            id: self.current,
            state: self.state.clone(),
            query: self.query.clone(),
        }
    }

    fn encode(&self) -> String {
        let mut params = url::encode(&self.state);
        self.compare.encode_into(&mut params);
        params.to_query_string()
    }
}
