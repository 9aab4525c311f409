use serde::{Deserialize, Serialize};

// Query parameters for /api/coins/{id}/market_chart. Values are forwarded
// to upstream as-is; `days` stays a string so windows like "max" survive.
#[derive(Debug, Deserialize)]
pub struct MarketChartQuery {
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_days")]
    pub days: String,
}

// Query parameters for /api/coins/markets
#[derive(Debug, Deserialize)]
pub struct MarketsQuery {
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_order")]
    pub order: String,
    #[serde(default = "default_per_page")]
    pub per_page: String,
    #[serde(default = "default_page")]
    pub page: String,
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_days() -> String {
    "7".to_string()
}

fn default_order() -> String {
    "market_cap_desc".to_string()
}

fn default_per_page() -> String {
    "100".to_string()
}

fn default_page() -> String {
    "1".to_string()
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            message: "Crypto Dashboard API is running",
        }
    }
}
