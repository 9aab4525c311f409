use std::sync::Arc;
use std::time::Instant;

use axum::{Json, extract::State};
use serde_json::Value;

use super::cached_fetch;
use crate::cache::make_cache_key;
use crate::error::ApiError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::state::AppState;
use crate::upstream::UpstreamError;

// Fixed queries for the 24h movers: upstream does the sorting, we keep the
// single top row.
const GAINER_ORDER: &str = "price_change_percentage_24h_desc";
const LOSER_ORDER: &str = "price_change_percentage_24h_asc";

// GET /api/top-gainer: best 24h performer, or null when upstream lists none
pub async fn top_gainer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    top_mover(&state, "top_gainer", GAINER_ORDER)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to fetch top gainer", e))
}

// GET /api/top-loser: worst 24h performer, or null when upstream lists none
pub async fn top_loser_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    top_mover(&state, "top_loser", LOSER_ORDER)
        .await
        .map(Json)
        .map_err(|e| ApiError::new("Failed to fetch top loser", e))
}

// Request a one-row listing sorted by 24h change and keep the first
// element. The selected value (null included) is what gets cached.
async fn top_mover(
    state: &AppState,
    resource: &str,
    order: &str,
) -> Result<Value, UpstreamError> {
    REQUEST_TOTAL.inc();
    let start = Instant::now();

    let key = make_cache_key(resource, &[]);
    let fetch = async {
        let listing = state
            .upstream
            .get_json(
                "/coins/markets",
                &[
                    ("vs_currency", "usd"),
                    ("order", order),
                    ("per_page", "1"),
                    ("page", "1"),
                ],
            )
            .await?;
        Ok(first_or_null(listing))
    };
    let result = cached_fetch(state, &key, resource, fetch).await;

    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());
    result
}

// [x, ..] -> x; [] or a non-array body -> null
fn first_or_null(listing: Value) -> Value {
    match listing {
        Value::Array(mut items) if !items.is_empty() => items.remove(0),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn takes_first_element_of_listing() {
        let listing = json!([
            {"id": "foo", "price_change_percentage_24h": 42.5},
            {"id": "bar", "price_change_percentage_24h": 1.0}
        ]);

        assert_eq!(
            first_or_null(listing),
            json!({"id": "foo", "price_change_percentage_24h": 42.5})
        );
    }

    #[test]
    fn empty_listing_becomes_null() {
        assert_eq!(first_or_null(json!([])), Value::Null);
    }

    #[test]
    fn non_array_body_becomes_null() {
        assert_eq!(first_or_null(json!({"status": "error"})), Value::Null);
    }
}
