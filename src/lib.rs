//! Coffee Finder: search coffee places by city or tag
//!
//! A typed client for a places API, an in-memory suggestion index with
//! inline autocomplete, and a small web front end around them.

pub mod autocomplete;
pub mod cache;
pub mod config;
pub mod input;
pub mod metrics;
pub mod network;
pub mod places;
pub mod search;
pub mod skeleton;
pub mod web;

pub use autocomplete::{Autocompleter, Suggestion, SuggestionIndex, SuggestionKind};
pub use config::Settings;
pub use input::SearchInput;
pub use places::{PlaceRecord, PlaceRepository, PlacesClient, SearchParams};
pub use search::{ResultsView, SearchIntent, SearchSession};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
