//! Autocomplete for the search bar
//!
//! Builds a suggestion index from fetched places and matches partial input
//! against it to produce a single suggestion plus its ghost text.

mod index;
mod matcher;

pub use index::{city_key, SuggestionIndex};
pub use matcher::{ghost_text, match_input, Autocompleter, Suggestion, SuggestionKind};
