//! Search execution with a minimum display time and stale-response guard

use super::models::{ResultsView, SearchIntent, SearchOutcome, SortOrder};
use crate::metrics::Metrics;
use crate::places::{PlaceRepository, SearchFilters, SearchParams};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Default minimum time a loading state stays on screen
pub const MIN_DISPLAY_TIME: Duration = Duration::from_millis(1000);

/// One user's sequence of searches.
///
/// Every call takes a new token. When a call finishes after a newer call has
/// started, it reports [`SearchOutcome::Superseded`] instead of its results.
pub struct SearchSession {
    repo: Arc<dyn PlaceRepository>,
    min_display: Duration,
    latest: AtomicU64,
    metrics: Option<Arc<Metrics>>,
}

impl SearchSession {
    /// Create a new session
    pub fn new(repo: Arc<dyn PlaceRepository>) -> Self {
        Self {
            repo,
            min_display: MIN_DISPLAY_TIME,
            latest: AtomicU64::new(0),
            metrics: None,
        }
    }

    /// Set minimum display time
    pub fn with_min_display(mut self, min_display: Duration) -> Self {
        self.min_display = min_display;
        self
    }

    /// Record outcomes into shared metrics
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Resolve an intent against the known cities and tags, then search
    pub async fn execute(
        &self,
        intent: &SearchIntent,
        known_cities: &[String],
        filters: &SearchFilters,
        sort: SortOrder,
    ) -> SearchOutcome {
        let params = intent
            .to_params(known_cities, &self.repo.available_tags())
            .with_filters(filters.clone());
        info!("Searching for {:?} as {:?}", intent.value, intent.kind);
        self.execute_params(&params, sort).await
    }

    /// Search with explicit parameters
    pub async fn execute_params(&self, params: &SearchParams, sort: SortOrder) -> SearchOutcome {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();

        let result = self.repo.search(params).await;
        let fetch_time = start.elapsed();

        if fetch_time < self.min_display {
            sleep(self.min_display - fetch_time).await;
        }

        let view = match result {
            Ok(mut places) => {
                sort.sort(&mut places);
                ResultsView::from_places(places)
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                ResultsView::Failed {
                    message: e.to_string(),
                }
            }
        };

        if let Some(ref metrics) = self.metrics {
            metrics.record_search(&view, fetch_time.as_millis() as u64);
        }

        if self.latest.load(Ordering::SeqCst) != token {
            debug!("Dropping results of superseded search #{}", token);
            if let Some(ref metrics) = self.metrics {
                metrics.record_superseded();
            }
            return SearchOutcome::Superseded;
        }

        SearchOutcome::Completed(view)
    }

    /// Number of searches started in this session
    pub fn searches_started(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
