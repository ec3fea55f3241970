//! Wire types shared by every remote query transport
//!
//! The backend exposes two stored procedures over HTTP: one returning a page
//! of rows and one returning aggregate stats for the same filter set. Both
//! take the filter payload as named `p_*` arguments. The native client lives
//! in `client`; the browser build posts the same payload with `gloo-net`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::filters::FilterState;
use crate::filters::fields::{MultiField, RangeField, TriStateField};

/// Remote endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Base URL of the RPC gateway; procedures live under `{base_url}/rpc/`
    pub base_url: String,
    pub api_key: Option<String>,
    pub rows_procedure: String,
    pub stats_procedure: String,
    pub timeout_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            api_key: None,
            rows_procedure: "filter_games".to_string(),
            stats_procedure: "filter_games_stats".to_string(),
            timeout_ms: 15_000,
        }
    }
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/rpc/{}", self.base_url.trim_end_matches('/'), procedure)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum QueryError {
    /// The server answered with an error body
    #[error("query rejected ({status}): {message}")]
    Application { status: u16, message: String },

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl QueryError {
    /// Text suitable for showing in the UI
    pub fn user_message(&self) -> String {
        match self {
            QueryError::Application { message, .. } => message.clone(),
            QueryError::Timeout(_) => {
                "The query took too long. Try narrowing your filters, then retry.".to_string()
            }
            QueryError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            QueryError::Decode(_) => "The server sent a response that could not be read.".to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }

    /// Build an application error from a non-success body. JSON bodies with a
    /// `message` field use it; anything else falls back to the raw text.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                }
            });
        QueryError::Application { status, message }
    }
}

// ============================================================================
// Payload and results
// ============================================================================

/// Filter arguments sent to both procedures. Paging and column choice are not
/// part of the filter, so they are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryRequest {
    args: Map<String, Value>,
}

impl QueryRequest {
    pub fn from_state(state: &FilterState) -> Self {
        let mut request = Self::default();
        request.set("type", state.app_type.as_param());
        request.set("sort", state.sort.as_param());
        request.set("order", state.order.as_param());
        request.set_opt("search", state.search.as_deref());

        for field in RangeField::ALL {
            let range = state.range(*field);
            request.set_opt(&format!("min_{}", field.column()), range.min);
            request.set_opt(&format!("max_{}", field.column()), range.max);
        }
        for field in TriStateField::ALL {
            request.set_opt(field.column(), state.tri_state(*field));
        }
        for field in MultiField::ALL {
            let select = state.multi(*field);
            if !select.is_empty() {
                request.set(field.ids_key(), select.ids.clone());
                request.set(field.mode_column(), select.mode.as_param());
            }
        }
        if !state.categories.is_empty() {
            request.set("categories", state.categories.clone());
        }

        request.set_opt("min_discount", state.min_discount);
        request.set_opt("velocity_tier", state.velocity_tier.map(|t| t.as_param()));
        request.set_opt("steam_deck", state.steam_deck.map(|d| d.as_param()));
        request.set_opt("controller", state.controller.map(|c| c.as_param()));
        request.set_opt("release_year", state.release_year);
        request.set_opt("publisher_search", state.publisher_search.as_deref());
        request.set_opt("developer_search", state.developer_search.as_deref());
        request.set_opt("publisher_size", state.publisher_size.map(|s| s.as_param()));
        request.set_opt("min_vs_publisher", state.min_vs_publisher);
        request.set_opt(
            "ccu_tier",
            state.ccu_tier.and_then(|tier| tier.as_param().parse::<u8>().ok()),
        );
        request
    }

    /// Argument value by unprefixed name, e.g. `get("min_ccu")`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(&format!("p_{name}"))
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Payload for the rows procedure: filters plus paging
    pub fn with_paging(&self, limit: u32, offset: u32) -> Self {
        let mut paged = self.clone();
        paged.set("limit", limit);
        paged.set("offset", offset);
        paged
    }

    fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.args.insert(format!("p_{name}"), value.into());
    }

    fn set_opt<T: Into<Value>>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }
}

/// One result row; columns are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRow(pub Map<String, Value>);

impl ResultRow {
    /// Store app id (`appid` column)
    pub fn id(&self) -> Option<u64> {
        self.0.get("appid").and_then(Value::as_u64)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }
}

/// Aggregate figures over the whole filtered set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateStats(pub Map<String, Value>);

impl AggregateStats {
    /// Parse a stats response. Set-returning procedures answer with a
    /// one-row array; an empty array means no stats.
    pub fn from_response(body: Value) -> Result<Self, QueryError> {
        let body = match body {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            Value::Array(_) | Value::Null => Value::Object(Map::new()),
            other => other,
        };
        serde_json::from_value(body).map_err(|e| QueryError::Decode(e.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    pub rows: Vec<ResultRow>,
    pub stats: AggregateStats,
}

impl QueryResults {
    /// App ids of the returned rows, in order
    pub fn row_ids(&self) -> Vec<u64> {
        self.rows.iter().filter_map(ResultRow::id).collect()
    }

    /// For each row, its position in `row_ids()` and its id. Rows without an
    /// id get `None` and cannot be selected.
    pub fn selection_slots(&self) -> Vec<Option<(usize, u64)>> {
        let mut next = 0;
        self.rows
            .iter()
            .map(|row| {
                row.id().map(|id| {
                    next += 1;
                    (next - 1, id)
                })
            })
            .collect()
    }
}
