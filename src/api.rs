//! Remote query bindings for the browser
//!
//! Posts the same RPC payload as the native client, using `gloo-net`, and
//! races every call against a timer so a hung request surfaces as a timeout.

use futures::future::{Either, select};
use gamepulse_core::{AggregateStats, FilterState, QueryConfig, QueryError, QueryRequest, QueryResults, ResultRow};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use web_sys::console;

/// Endpoint settings baked in at build time
pub fn config() -> QueryConfig {
    let mut config = QueryConfig::default();
    if let Some(url) = option_env!("GAMEPULSE_API_URL") {
        config.base_url = url.to_string();
    }
    if let Some(key) = option_env!("GAMEPULSE_API_KEY") {
        config.api_key = Some(key.to_string());
    }
    config
}

/// Rows and stats for `state`, fetched concurrently.
pub async fn run_query(config: &QueryConfig, state: &FilterState) -> Result<QueryResults, QueryError> {
    let filters = QueryRequest::from_state(state);
    let paged = filters.with_paging(state.limit, state.offset);

    let rows = async {
        let body = call(config, &config.rows_procedure, &paged).await?;
        serde_json::from_value::<Vec<ResultRow>>(body).map_err(|e| QueryError::Decode(e.to_string()))
    };
    let stats = async {
        let body = call(config, &config.stats_procedure, &filters).await?;
        AggregateStats::from_response(body)
    };

    let (rows, stats) = futures::try_join!(rows, stats)?;
    Ok(QueryResults { rows, stats })
}

async fn call(config: &QueryConfig, procedure: &str, payload: &QueryRequest) -> Result<Value, QueryError> {
    let timeout_ms = u32::try_from(config.timeout_ms).unwrap_or(u32::MAX);
    let request = send(config, procedure, payload);

    match select(Box::pin(request), Box::pin(TimeoutFuture::new(timeout_ms))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            console::warn_1(&format!("{} timed out after {}ms", procedure, timeout_ms).into());
            Err(QueryError::Timeout(config.timeout()))
        }
    }
}

async fn send(config: &QueryConfig, procedure: &str, payload: &QueryRequest) -> Result<Value, QueryError> {
    let url = config.procedure_url(procedure);
    console::log_1(&format!("Calling {} ({} args)", procedure, payload.len()).into());

    let mut builder = Request::post(&url);
    if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        builder = builder
            .header("apikey", key)
            .header("Authorization", &format!("Bearer {}", key));
    }
    let request = builder
        .json(payload)
        .map_err(|e| QueryError::Decode(e.to_string()))?;

    let response = request.send().await.map_err(|e| {
        console::error_1(&format!("{} failed: {}", procedure, e).into());
        QueryError::Network(e.to_string())
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| QueryError::Network(e.to_string()))?;

    if !response.ok() {
        let err = QueryError::from_response_body(status, &text);
        console::error_1(&format!("{} returned an error: {}", procedure, err).into());
        return Err(err);
    }

    serde_json::from_str(&text).map_err(|e| QueryError::Decode(e.to_string()))
}
