//! Search intents, outcomes and related data models

use crate::places::{PlaceRecord, SearchParams};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Structured filter a submitted query maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    City,
    Tag,
}

impl IntentKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "city" => Some(IntentKind::City),
            "tag" => Some(IntentKind::Tag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::City => "city",
            IntentKind::Tag => "tag",
        }
    }
}

/// A user-confirmed query, built at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntent {
    pub value: String,
    pub kind: Option<IntentKind>,
}

impl SearchIntent {
    pub fn new(value: impl Into<String>, kind: Option<IntentKind>) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn city(value: impl Into<String>) -> Self {
        Self::new(value, Some(IntentKind::City))
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::new(value, Some(IntentKind::Tag))
    }

    /// Turn the intent into API parameters.
    ///
    /// Without a kind, an exact city match wins, then an exact tag match;
    /// anything else is searched as a city.
    pub fn to_params(&self, known_cities: &[String], known_tags: &[String]) -> SearchParams {
        match self.kind {
            Some(IntentKind::City) => SearchParams::city(&self.value),
            Some(IntentKind::Tag) => SearchParams::tag(&self.value),
            None => {
                if known_cities
                    .iter()
                    .any(|c| c.to_lowercase() == self.value.to_lowercase())
                {
                    SearchParams::city(&self.value)
                } else if known_tags
                    .iter()
                    .any(|t| t.to_lowercase() == self.value.to_lowercase())
                {
                    SearchParams::tag(&self.value)
                } else {
                    SearchParams::city(&self.value)
                }
            }
        }
    }
}

/// Result list ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest rating first
    #[default]
    Rating,
    /// Alphabetical by name
    Name,
}

impl SortOrder {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "name" => SortOrder::Name,
            _ => SortOrder::Rating,
        }
    }

    /// The other order, for the sort toggle
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Rating => SortOrder::Name,
            SortOrder::Name => SortOrder::Rating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Rating => "rating",
            SortOrder::Name => "name",
        }
    }

    pub fn sort(&self, places: &mut [PlaceRecord]) {
        match self {
            SortOrder::Rating => places.sort_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.name.cmp(&b.name))
            }),
            SortOrder::Name => {
                places.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
    }
}

/// What the results view shows once loading ends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResultsView {
    Places { places: Vec<PlaceRecord> },
    Empty,
    Failed { message: String },
}

impl ResultsView {
    pub fn from_places(places: Vec<PlaceRecord>) -> Self {
        if places.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Places { places }
        }
    }

    pub fn count(&self) -> usize {
        match self {
            ResultsView::Places { places } => places.len(),
            _ => 0,
        }
    }
}

/// Outcome of one search in a session
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Latest search in its session; show it
    Completed(ResultsView),
    /// A newer search started while this one ran; discard it
    Superseded,
}
