//! Caching module for Coffee Finder
//!
//! Keeps one search session per browser session id so that overlapping
//! searches from the same page can supersede each other.

use crate::metrics::Metrics;
use crate::places::PlaceRepository;
use crate::search::SearchSession;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Cache of live search sessions keyed by session id
pub struct SessionCache {
    cache: Cache<String, Arc<SearchSession>>,
    repo: Arc<dyn PlaceRepository>,
    min_display: Duration,
    metrics: Arc<Metrics>,
}

impl SessionCache {
    /// Create a new session cache; sessions expire after `idle` without use
    pub fn new(
        repo: Arc<dyn PlaceRepository>,
        min_display: Duration,
        metrics: Arc<Metrics>,
        idle: Duration,
    ) -> Self {
        let cache = Cache::builder()
            .time_to_idle(idle)
            .max_capacity(10_000)
            .build();

        Self {
            cache,
            repo,
            min_display,
            metrics,
        }
    }

    /// Get the session for `id`, creating it on first use
    pub async fn session(&self, id: &str) -> Arc<SearchSession> {
        let repo = self.repo.clone();
        let min_display = self.min_display;
        let metrics = self.metrics.clone();

        self.cache
            .get_with(id.to_string(), async move {
                Arc::new(
                    SearchSession::new(repo)
                        .with_min_display(min_display)
                        .with_metrics(metrics),
                )
            })
            .await
    }

    /// A session that is not shared with anyone
    pub fn detached(&self) -> SearchSession {
        SearchSession::new(self.repo.clone())
            .with_min_display(self.min_display)
            .with_metrics(self.metrics.clone())
    }

    /// Get cache size
    pub fn size(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use crate::places::PlacesClient;

    fn cache() -> SessionCache {
        let client = PlacesClient::new(HttpClient::new().unwrap(), "http://127.0.0.1:9", vec![])
            .unwrap();
        SessionCache::new(
            Arc::new(client),
            Duration::ZERO,
            Arc::new(Metrics::new()),
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn test_same_id_same_session() {
        let cache = cache();
        let a = cache.session("abc").await;
        let b = cache.session("abc").await;
        let c = cache.session("xyz").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
