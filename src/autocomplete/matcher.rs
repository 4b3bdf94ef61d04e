//! Single-suggestion prefix matching and ghost text

use super::index::{city_key, SuggestionIndex};
use crate::config::{FallbackCity, SearchSettings};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// What a suggestion refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    City,
    Tag,
    Place,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::City => "city",
            SuggestionKind::Tag => "tag",
            SuggestionKind::Place => "place",
        }
    }
}

/// Best completion for the current input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: Option<SuggestionKind>,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            text: text.into(),
            kind: Some(kind),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn fold(s: &str) -> Vec<char> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn city_matches(key: &str, display: &str, lower: &str, stripped: &str) -> bool {
    let display_lower = display.to_lowercase();
    key.starts_with(lower)
        || display_lower.starts_with(lower)
        || strip_whitespace(key).starts_with(stripped)
        || strip_whitespace(&display_lower).starts_with(stripped)
}

/// Pick among matching cities: spaced names first, then shorter, then alphabetical
fn best_city<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .min_by_key(|display| (!display.contains(' '), display.chars().count(), *display))
}

/// Find the best suggestion for `input`.
///
/// Precedence: index tags, index cities, place names, then the static
/// fallback tags and cities.
pub fn match_input(
    input: &str,
    index: &SuggestionIndex,
    fallback_tags: &[String],
    fallback_cities: &[FallbackCity],
) -> Suggestion {
    if input.trim().is_empty() {
        return Suggestion::none();
    }

    let lower = input.to_lowercase();
    let stripped = strip_whitespace(&lower);

    if let Some(tag) = index.tags().find(|tag| tag.starts_with(&lower)) {
        return Suggestion::new(tag, SuggestionKind::Tag);
    }

    let cities = index
        .cities()
        .filter(|(key, display)| city_matches(key, display, &lower, &stripped))
        .map(|(_, display)| display);
    if let Some(city) = best_city(cities) {
        return Suggestion::new(city, SuggestionKind::City);
    }

    if let Some(name) = index
        .place_names()
        .find(|name| name.to_lowercase().starts_with(&lower))
    {
        return Suggestion::new(name, SuggestionKind::Place);
    }

    if let Some(tag) = fallback_tags
        .iter()
        .find(|tag| tag.to_lowercase().starts_with(&lower))
    {
        return Suggestion::new(tag.as_str(), SuggestionKind::Tag);
    }

    let cities = fallback_cities
        .iter()
        .filter(|c| city_matches(&c.key, &c.display, &lower, &stripped))
        .map(|c| c.display.as_str());
    if let Some(city) = best_city(cities) {
        return Suggestion::new(city, SuggestionKind::City);
    }

    Suggestion::none()
}

/// The part of `suggestion` still to be typed after `input`.
///
/// Comparison ignores case and whitespace; the returned remainder keeps the
/// suggestion's own casing and spacing. Empty when `input` is not a prefix.
pub fn ghost_text(input: &str, suggestion: &str) -> String {
    let wanted = fold(input);
    if wanted.is_empty() || !fold(suggestion).starts_with(&wanted) {
        return String::new();
    }

    let mut matched = 0;
    for (i, c) in suggestion.char_indices() {
        if matched >= wanted.len() {
            return suggestion[i..].to_string();
        }
        if c.is_whitespace() {
            continue;
        }
        matched += c.to_lowercase().count();
    }

    String::new()
}

/// Matcher bound to the current index snapshot and the static fallbacks
#[derive(Debug)]
pub struct Autocompleter {
    index: RwLock<Arc<SuggestionIndex>>,
    fallback_tags: Vec<String>,
    fallback_cities: Vec<FallbackCity>,
}

impl Default for Autocompleter {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Autocompleter {
    pub fn new(fallback_tags: Vec<String>, fallback_cities: Vec<FallbackCity>) -> Self {
        Self {
            index: RwLock::new(Arc::new(SuggestionIndex::default())),
            fallback_tags,
            fallback_cities,
        }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.tags.clone(), settings.fallback_cities.clone())
    }

    /// Current index
    pub fn snapshot(&self) -> Arc<SuggestionIndex> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a freshly built index
    pub fn replace_index(&self, index: SuggestionIndex) {
        debug!(
            "Replacing suggestion index ({} cities)",
            index.city_count()
        );
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(index);
    }

    /// Suggestion for `input` against the current snapshot
    pub fn suggest(&self, input: &str) -> Suggestion {
        match_input(
            input,
            &self.snapshot(),
            &self.fallback_tags,
            &self.fallback_cities,
        )
    }

    /// Canonical key for a city, looked up in the index first and then in
    /// the fallback list
    pub fn canonical_city(&self, value: &str) -> Option<String> {
        if let Some(key) = self.snapshot().canonical_city(value) {
            return Some(key.to_string());
        }

        let key = city_key(value);
        self.fallback_cities
            .iter()
            .find(|c| c.key == key || city_key(&c.display) == key)
            .map(|c| c.key.clone())
    }

    pub fn fallback_tags(&self) -> &[String] {
        &self.fallback_tags
    }

    pub fn fallback_cities(&self) -> &[FallbackCity] {
        &self.fallback_cities
    }
}
