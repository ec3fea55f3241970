//! Native remote query client (`reqwest` + `tokio`)
//!
//! No automatic retries: a timeout is reported as such and the caller decides
//! whether to try again.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::filters::FilterState;
use crate::query::{AggregateStats, QueryConfig, QueryError, QueryRequest, QueryResults, ResultRow};

#[derive(Debug, Clone)]
pub struct QueryClient {
    config: QueryConfig,
    client: reqwest::Client,
}

impl QueryClient {
    pub fn new(config: QueryConfig) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gamepulse/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| QueryError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Fetch one page of rows for the state's filters, limit and offset.
    pub async fn fetch_rows(&self, state: &FilterState) -> Result<Vec<ResultRow>, QueryError> {
        let payload = QueryRequest::from_state(state).with_paging(state.limit, state.offset);
        let body = self.call(&self.config.rows_procedure, &payload).await?;
        serde_json::from_value(body).map_err(|e| QueryError::Decode(e.to_string()))
    }

    /// Fetch aggregate stats for the state's filters.
    pub async fn fetch_stats(&self, state: &FilterState) -> Result<AggregateStats, QueryError> {
        let payload = QueryRequest::from_state(state);
        let body = self.call(&self.config.stats_procedure, &payload).await?;
        AggregateStats::from_response(body)
    }

    /// Rows and stats, requested concurrently.
    pub async fn run(&self, state: &FilterState) -> Result<QueryResults, QueryError> {
        let (rows, stats) = tokio::try_join!(self.fetch_rows(state), self.fetch_stats(state))?;
        Ok(QueryResults { rows, stats })
    }

    async fn call(&self, procedure: &str, payload: &QueryRequest) -> Result<Value, QueryError> {
        let url = self.config.procedure_url(procedure);
        let timeout = self.config.timeout();
        info!(procedure, args = payload.len(), "Calling remote procedure");

        let mut request = self.client.post(&url).json(payload);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            let err = map_reqwest_error(e, timeout);
            warn!(procedure, error = %err, "Remote procedure failed");
            err
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        if !status.is_success() {
            let err = QueryError::from_response_body(status.as_u16(), &String::from_utf8_lossy(&bytes));
            warn!(procedure, error = %err, "Remote procedure returned an error");
            return Err(err);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(procedure, error = %e, "Could not decode remote response");
            QueryError::Decode(e.to_string())
        })
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> QueryError {
    if err.is_timeout() {
        QueryError::Timeout(timeout)
    } else if err.is_decode() {
        QueryError::Decode(err.to_string())
    } else {
        QueryError::Network(err.to_string())
    }
}
