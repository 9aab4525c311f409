mod coins;
mod health;
mod metrics;
mod movers;

pub use coins::{coins_list_handler, market_chart_handler, markets_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use movers::{top_gainer_handler, top_loser_handler};

use std::future::Future;
use std::sync::Arc;

use axum::{Router, routing::get};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use crate::metrics::{CACHE_HITS, CACHE_MISSES, CACHE_SIZE, UPSTREAM_ERRORS};
use crate::state::AppState;
use crate::upstream::UpstreamError;

/// Builds the application router. The dashboard is served from another
/// origin, so CORS stays wide open like the original deployment.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/coins/list", get(coins_list_handler))
        .route("/api/coins/{id}/market_chart", get(market_chart_handler))
        .route("/api/coins/markets", get(markets_handler))
        .route("/api/top-gainer", get(top_gainer_handler))
        .route("/api/top-loser", get(top_loser_handler))
        .route("/api/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Shared fetch-through-cache path: serve a fresh entry when present,
// otherwise collapse concurrent misses behind the key's flight guard and
// fetch once. `fetch` is lazy and only awaited on a real miss.
pub(crate) async fn cached_fetch(
    state: &AppState,
    key: &str,
    resource: &str,
    fetch: impl Future<Output = Result<Value, UpstreamError>>,
) -> Result<Value, UpstreamError> {
    if let Some(value) = state.cache.get(key) {
        CACHE_HITS.inc();
        debug!(resource, "cache hit");
        return Ok(value);
    }

    let flight = state.cache.flight(key);
    let _guard = flight.lock().await;

    // another request may have fetched while we waited on the guard
    if let Some(value) = state.cache.get(key) {
        CACHE_HITS.inc();
        debug!(resource, "cache hit after in-flight fetch");
        return Ok(value);
    }

    CACHE_MISSES.inc();
    debug!(resource, "cache miss, fetching upstream");

    match fetch.await {
        Ok(value) => {
            state.cache.insert(key, value.clone());
            CACHE_SIZE.set(state.cache.len() as f64);
            Ok(value)
        }
        Err(err) => {
            // failures are never cached; the next request retries upstream
            UPSTREAM_ERRORS.inc();
            warn!(resource, error = %err, "upstream fetch failed");
            Err(err)
        }
    }
}
