use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;

use super::cached_fetch;
use crate::cache::make_cache_key;
use crate::error::ApiError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{MarketChartQuery, MarketsQuery};
use crate::state::AppState;

// GET /api/coins/list: the full upstream coin index, unmodified
pub async fn coins_list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    REQUEST_TOTAL.inc();
    let start = Instant::now();

    let key = make_cache_key("coins_list", &[]);
    let result = cached_fetch(
        &state,
        &key,
        "coins_list",
        state.upstream.get_json("/coins/list", &[]),
    )
    .await;

    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());
    result
        .map(Json)
        .map_err(|e| ApiError::new("Failed to fetch coins list", e))
}

// GET /api/coins/{id}/market_chart: price/volume series for one coin.
// The payload ({prices, total_volumes, market_caps}) passes through
// untouched; pairing and rounding happen in the dashboard.
pub async fn market_chart_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<MarketChartQuery>,
) -> Result<Json<Value>, ApiError> {
    REQUEST_TOTAL.inc();
    let start = Instant::now();

    let key = make_cache_key(
        "market_chart",
        &[id.as_str(), query.vs_currency.as_str(), query.days.as_str()],
    );
    let path = format!("/coins/{id}/market_chart");
    let result = cached_fetch(
        &state,
        &key,
        "market_chart",
        state.upstream.get_json(
            &path,
            &[
                ("vs_currency", query.vs_currency.as_str()),
                ("days", query.days.as_str()),
            ],
        ),
    )
    .await;

    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());
    result
        .map(Json)
        .map_err(|e| ApiError::new("Failed to fetch market chart data", e))
}

// GET /api/coins/markets: paged market listings
pub async fn markets_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> Result<Json<Value>, ApiError> {
    REQUEST_TOTAL.inc();
    let start = Instant::now();

    let key = make_cache_key(
        "markets",
        &[
            query.vs_currency.as_str(),
            query.order.as_str(),
            query.per_page.as_str(),
            query.page.as_str(),
        ],
    );
    let result = cached_fetch(
        &state,
        &key,
        "markets",
        state.upstream.get_json(
            "/coins/markets",
            &[
                ("vs_currency", query.vs_currency.as_str()),
                ("order", query.order.as_str()),
                ("per_page", query.per_page.as_str()),
                ("page", query.page.as_str()),
            ],
        ),
    )
    .await;

    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());
    result
        .map(Json)
        .map_err(|e| ApiError::new("Failed to fetch markets data", e))
}
