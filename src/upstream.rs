use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Upstream request timeout, measured from request start.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

// Failure of a single upstream fetch. Never cached, never retried here.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("timeout")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid JSON from upstream: {0}")]
    Decode(String),
}

/// Single-attempt client for the market-data API.
///
/// Every call is exactly one outbound GET with no retries or backoff; a
/// failed call surfaces immediately and the caller decides what to relay.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    // GET {base_url}{path}?{query}, parsed as JSON
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).timeout(UPSTREAM_TIMEOUT);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Decode(e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_relayed_verbatim() {
        // clients surface this string in the error body
        assert_eq!(UpstreamError::Timeout.to_string(), "timeout");
    }

    #[test]
    fn status_error_names_the_code() {
        assert_eq!(
            UpstreamError::Status(429).to_string(),
            "upstream returned status 429"
        );
    }
}
