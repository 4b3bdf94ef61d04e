//! Place records and search parameters

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static HOUR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid hour regex"));

/// Check a `HH:MM` time string
pub fn is_valid_hour(value: &str) -> bool {
    HOUR_RE.is_match(value)
}

/// Reasons a decoded record is rejected
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("rating {0} outside 0..=5")]
    Rating(f64),
    #[error("invalid opening time {0:?}")]
    Hours(String),
    #[error("empty id")]
    EmptyId,
}

/// Opening hours window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenHours {
    pub start: String,
    pub end: String,
}

impl OpenHours {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Human readable "start - end"
    pub fn display(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

/// A coffee place as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub open_hours: Option<OpenHours>,
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Full OSM opening hours string, e.g. "Mo-Fr 08:00-18:00"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_outdoor_seating: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wheelchair_access: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_takeaway: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_delivery: Option<bool>,

    /// 0-10 score based on data completeness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_review_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_price_level: Option<u8>,
}

impl PlaceRecord {
    /// Minimal record, mostly for fallback data and tests
    pub fn new(id: impl Into<String>, name: impl Into<String>, rating: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: None,
            rating,
            open_hours: None,
            tags: Vec::new(),
            lat: None,
            lon: None,
            address: None,
            phone: None,
            website: None,
            email: None,
            opening_hours: None,
            has_wifi: None,
            has_outdoor_seating: None,
            has_wheelchair_access: None,
            has_takeaway: None,
            has_delivery: None,
            quality_score: None,
            is_verified: None,
            google_rating: None,
            google_review_count: None,
            google_price_level: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_hours(mut self, start: &str, end: &str) -> Self {
        self.open_hours = Some(OpenHours::new(start, end));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check the invariants the API schema promises
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id.is_empty() {
            return Err(RecordError::EmptyId);
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(RecordError::Rating(self.rating));
        }
        if let Some(ref hours) = self.open_hours {
            for value in [&hours.start, &hours.end] {
                if !is_valid_hour(value) {
                    return Err(RecordError::Hours(value.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Refinements layered on top of a city or tag search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_before: Option<String>,
}

impl SearchFilters {
    /// Build filters from raw form values. Blank, unparsable and
    /// out-of-range values are dropped.
    pub fn from_form(
        min_rating: Option<&str>,
        open_after: Option<&str>,
        open_before: Option<&str>,
    ) -> Self {
        let hour = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| is_valid_hour(v))
                .map(String::from)
        };

        Self {
            min_rating: min_rating
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|r| (0.0..=5.0).contains(r)),
            open_after: hour(open_after),
            open_before: hour(open_before),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_rating.is_none() && self.open_after.is_none() && self.open_before.is_none()
    }

    /// Query string pairs as the places API names them
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(rating) = self.min_rating {
            query.push(("minRating".to_string(), rating.clamp(0.0, 5.0).to_string()));
        }
        if let Some(ref after) = self.open_after {
            if is_valid_hour(after) {
                query.push(("openAfter".to_string(), after.clone()));
            }
        }
        if let Some(ref before) = self.open_before {
            if is_valid_hour(before) {
                query.push(("openBefore".to_string(), before.clone()));
            }
        }

        query
    }
}

/// Parameters for a place search. Only present fields become query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub city: Option<String>,
    pub tags: Vec<String>,
    pub filters: SearchFilters,
}

impl SearchParams {
    /// Search by city
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Default::default()
        }
    }

    /// Search by a single tag
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tags: vec![tag.into()],
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(ref city) = self.city {
            if !city.is_empty() {
                query.push(("city".to_string(), city.clone()));
            }
        }
        if !self.tags.is_empty() {
            query.push(("tags".to_string(), self.tags.join(",")));
        }
        query.extend(self.filters.to_query());

        query
    }
}
