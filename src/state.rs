use std::time::Duration;

use crate::cache::Cache;
use crate::config::Args;
use crate::upstream::UpstreamClient;

// App's shared state: the response cache and the upstream client, built
// once at startup and injected into every handler. Discarded at shutdown;
// nothing persists across restarts.
pub struct AppState {
    pub upstream: UpstreamClient,
    pub cache: Cache,
}

impl AppState {
    pub fn new(upstream_url: String, ttl: Duration) -> Self {
        Self {
            upstream: UpstreamClient::new(upstream_url),
            cache: Cache::new(ttl),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(
            args.upstream_url.clone(),
            Duration::from_secs(args.cache_ttl),
        )
    }
}
