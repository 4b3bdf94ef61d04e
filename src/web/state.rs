//! Application state shared across handlers

use crate::autocomplete::{Autocompleter, SuggestionIndex};
use crate::cache::SessionCache;
use crate::config::Settings;
use crate::metrics::Metrics;
use crate::places::{distinct_cities, PlaceRepository};
use crate::skeleton::SkeletonPool;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Places API
    pub repo: Arc<dyn PlaceRepository>,
    /// Autocomplete matcher and its index
    pub autocompleter: Arc<Autocompleter>,
    /// Cities from the last successful city listing
    pub cities: Arc<RwLock<Vec<String>>>,
    /// Per-browser search sessions
    pub sessions: Arc<SessionCache>,
    /// Loading placeholder data
    pub skeleton: Arc<SkeletonPool>,
    /// Search metrics
    pub metrics: Arc<Metrics>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, repo: Arc<dyn PlaceRepository>) -> anyhow::Result<Self> {
        let metrics = Arc::new(Metrics::new());
        let sessions = Arc::new(SessionCache::new(
            repo.clone(),
            Duration::from_millis(settings.search.min_display_ms),
            metrics.clone(),
            Duration::from_secs(settings.search.session_idle_secs.max(1)),
        ));
        let autocompleter = Arc::new(Autocompleter::from_settings(&settings.search));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            repo,
            autocompleter,
            cities: Arc::new(RwLock::new(Vec::new())),
            sessions,
            skeleton: Arc::new(SkeletonPool::new()),
            metrics,
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Cities known from the API
    pub fn known_cities(&self) -> Vec<String> {
        self.cities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Tags offered to the user
    pub fn available_tags(&self) -> Vec<String> {
        self.repo.available_tags()
    }

    /// Fetch all places once, then rebuild the suggestion index, the city
    /// list and the skeleton pool from them. Failures keep whatever was
    /// there before.
    pub async fn refresh(&self) {
        let places = match self.repo.fetch_all().await {
            Ok(places) => places,
            Err(e) => {
                warn!("Could not build suggestion index: {}", e);
                return;
            }
        };

        let index = SuggestionIndex::build(&places);
        info!(
            "Suggestion index built from {} places ({} cities)",
            places.len(),
            index.city_count()
        );
        self.autocompleter.replace_index(index);

        let cities = distinct_cities(&places);
        if !cities.is_empty() {
            *self.cities.write().unwrap_or_else(PoisonError::into_inner) = cities;
        }
        self.skeleton.replace(places);
    }

    /// Refresh once, then keep refreshing on the configured interval
    pub fn spawn_refresh(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        let every = state.settings.search.index_refresh_secs;

        tokio::spawn(async move {
            state.refresh().await;
            if every == 0 {
                return;
            }
            let mut ticker = tokio::time::interval(Duration::from_secs(every));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                state.refresh().await;
            }
        })
    }
}
