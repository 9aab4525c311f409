use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

// Cache entry with timestamp; replaced wholesale on refresh, never mutated.
#[derive(Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub created_at: Instant,
}

/// TTL-bounded response cache shared by all handlers.
///
/// An entry past the TTL is treated as a miss and stays in place until the
/// next successful fetch overwrites it; there is no eviction. The key space
/// is bounded by the distinct (resource, currency, window, page) tuples the
/// dashboard actually requests.
pub struct Cache {
    entries: DashMap<String, CacheEntry>,
    flights: DashMap<String, Arc<Mutex<()>>>,
    ttl: Duration,
}

impl Cache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            flights: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value if it is still fresh.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.created_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Stores a value under `key` with a fresh timestamp, overwriting any
    /// prior entry.
    pub fn insert(&self, key: &str, value: Value) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-key guard collapsing concurrent misses into a single upstream
    /// call. Callers lock the returned mutex, re-check the cache, and only
    /// fetch if the key is still absent. Guards share the entries' key
    /// space, so the flight map stays as small as the cache itself.
    pub fn flight(&self, key: &str) -> Arc<Mutex<()>> {
        self.flights
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

// Cache key: hash of the resource name plus its normalized parameters.
// A separator byte keeps ("a", "bc") and ("ab", "c") from hashing alike.
pub fn make_cache_key(resource: &str, params: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(resource);
    for param in params {
        hasher.update([0u8]);
        hasher.update(param);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    #[test]
    fn get_returns_value_within_ttl() {
        let cache = Cache::new(Duration::from_secs(60));
        cache.insert("k", json!({"price": 42}));

        assert_eq!(cache.get("k"), Some(json!({"price": 42})));
    }

    #[test]
    fn get_misses_after_ttl_elapses() {
        let cache = Cache::new(Duration::from_millis(40));
        cache.insert("k", json!(1));

        sleep(Duration::from_millis(60));

        assert_eq!(cache.get("k"), None);
        // expired entries are not purged, only ignored
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_overwrites_and_refreshes() {
        let cache = Cache::new(Duration::from_millis(40));
        cache.insert("k", json!("old"));

        sleep(Duration::from_millis(60));
        cache.insert("k", json!("new"));

        assert_eq!(cache.get("k"), Some(json!("new")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn repeated_gets_do_not_refresh_timestamp() {
        let cache = Cache::new(Duration::from_millis(80));
        cache.insert("k", json!(1));

        for _ in 0..3 {
            sleep(Duration::from_millis(35));
            cache.get("k");
        }

        // 3 * 35ms > 80ms: reads must not have extended the entry's life
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn missing_key_is_absent() {
        let cache = Cache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn cache_key_is_deterministic() {
        let a = make_cache_key("markets", &["usd", "market_cap_desc", "100", "1"]);
        let b = make_cache_key("markets", &["usd", "market_cap_desc", "100", "1"]);
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_separates_distinct_requests() {
        let list = make_cache_key("coins_list", &[]);
        let gainer = make_cache_key("top_gainer", &[]);
        assert_ne!(list, gainer);

        let btc = make_cache_key("market_chart", &["bitcoin", "usd", "7"]);
        let eth = make_cache_key("market_chart", &["ethereum", "usd", "7"]);
        assert_ne!(btc, eth);

        // field boundaries matter
        let ab_c = make_cache_key("x", &["ab", "c"]);
        let a_bc = make_cache_key("x", &["a", "bc"]);
        assert_ne!(ab_c, a_bc);
    }

    #[test]
    fn flight_guard_is_shared_per_key() {
        let cache = Cache::new(Duration::from_secs(60));
        let first = cache.flight("k");
        let second = cache.flight("k");
        let other = cache.flight("j");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
