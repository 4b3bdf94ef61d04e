//! Metrics collection module
//!
//! Tracks search volume, outcomes and upstream response times.

use crate::search::ResultsView;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

const RESPONSE_WINDOW: usize = 100;

/// Process-wide search metrics
pub struct Metrics {
    total_searches: AtomicU64,
    failed_searches: AtomicU64,
    empty_searches: AtomicU64,
    superseded_searches: AtomicU64,
    autocomplete_requests: AtomicU64,
    /// Last upstream response times in ms
    response_times: RwLock<VecDeque<u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            failed_searches: AtomicU64::new(0),
            empty_searches: AtomicU64::new(0),
            superseded_searches: AtomicU64::new(0),
            autocomplete_requests: AtomicU64::new(0),
            response_times: RwLock::new(VecDeque::with_capacity(RESPONSE_WINDOW)),
        }
    }

    /// Record a finished search and how long the upstream call took
    pub fn record_search(&self, view: &ResultsView, time_ms: u64) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        match view {
            ResultsView::Failed { .. } => {
                self.failed_searches.fetch_add(1, Ordering::Relaxed);
            }
            ResultsView::Empty => {
                self.empty_searches.fetch_add(1, Ordering::Relaxed);
            }
            ResultsView::Places { .. } => {}
        }

        let mut times = self
            .response_times
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if times.len() >= RESPONSE_WINDOW {
            times.pop_front();
        }
        times.push_back(time_ms);
    }

    pub fn record_superseded(&self) {
        self.superseded_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_autocomplete(&self) {
        self.autocomplete_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Average upstream response time over the recent window
    pub fn avg_response_time(&self) -> Option<u64> {
        let times = self
            .response_times
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_searches: self.total_searches.load(Ordering::Relaxed),
            failed_searches: self.failed_searches.load(Ordering::Relaxed),
            empty_searches: self.empty_searches.load(Ordering::Relaxed),
            superseded_searches: self.superseded_searches.load(Ordering::Relaxed),
            autocomplete_requests: self.autocomplete_requests.load(Ordering::Relaxed),
            avg_response_time_ms: self.avg_response_time(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub failed_searches: u64,
    pub empty_searches: u64,
    pub superseded_searches: u64,
    pub autocomplete_requests: u64,
    pub avg_response_time_ms: Option<u64>,
}
