//! Search bar state machine

use crate::autocomplete::{ghost_text, Autocompleter, SuggestionKind};
use crate::search::{IntentKind, SearchIntent};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Keys the search bar reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Other,
}

/// Where the search bar is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputState {
    Idle,
    Typing,
    Submitted,
}

/// Per-keystroke state of the search bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputSessionState {
    pub raw_input: String,
    pub suggestion: String,
    pub suggestion_kind: Option<SuggestionKind>,
}

/// Result of a key press
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Whether the browser's default action must be suppressed
    pub prevent_default: bool,
    /// Set when the key submitted a search
    pub intent: Option<SearchIntent>,
}

/// Text entry with single-suggestion autocomplete
pub struct SearchInput {
    autocompleter: Arc<Autocompleter>,
    state: InputSessionState,
    phase: InputState,
}

impl SearchInput {
    pub fn new(autocompleter: Arc<Autocompleter>) -> Self {
        Self {
            autocompleter,
            state: InputSessionState::default(),
            phase: InputState::Idle,
        }
    }

    /// Replace the text and recompute the suggestion
    pub fn set_input(&mut self, text: &str) {
        if text.is_empty() {
            self.state = InputSessionState::default();
            self.phase = InputState::Idle;
            return;
        }

        let suggestion = self.autocompleter.suggest(text);
        self.state = InputSessionState {
            raw_input: text.to_string(),
            suggestion: suggestion.text,
            suggestion_kind: suggestion.kind,
        };
        self.phase = InputState::Typing;
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Tab if !self.state.suggestion.is_empty() => {
                // Kind is kept: the accepted text is still a city/tag/place
                self.state.raw_input = std::mem::take(&mut self.state.suggestion);
                KeyOutcome {
                    prevent_default: true,
                    intent: None,
                }
            }
            Key::Enter => KeyOutcome {
                prevent_default: true,
                intent: self.submit(),
            },
            Key::Escape => {
                self.state.suggestion.clear();
                self.state.suggestion_kind = None;
                KeyOutcome::default()
            }
            Key::Tab | Key::Other => KeyOutcome::default(),
        }
    }

    /// Build the search intent, or `None` when there is nothing to search
    pub fn submit(&mut self) -> Option<SearchIntent> {
        if self.state.raw_input.trim().is_empty() {
            return None;
        }

        let final_value = if self.state.suggestion.is_empty() {
            self.state.raw_input.clone()
        } else {
            self.state.suggestion.clone()
        };

        let intent = match self.state.suggestion_kind {
            Some(SuggestionKind::City) => {
                let key = self
                    .autocompleter
                    .canonical_city(&final_value)
                    .unwrap_or(final_value);
                SearchIntent::new(key, Some(IntentKind::City))
            }
            Some(SuggestionKind::Tag) => SearchIntent::new(final_value, Some(IntentKind::Tag)),
            // Place names have no structured filter
            Some(SuggestionKind::Place) | None => SearchIntent::new(final_value, None),
        };

        debug!("Submitting {:?}", intent);
        self.phase = InputState::Submitted;
        Some(intent)
    }

    /// Remaining completion shown after the typed text
    pub fn ghost_text(&self) -> String {
        if self.state.suggestion.is_empty() {
            return String::new();
        }
        ghost_text(&self.state.raw_input, &self.state.suggestion)
    }

    pub fn state(&self) -> &InputSessionState {
        &self.state
    }

    pub fn phase(&self) -> InputState {
        self.phase
    }

    pub fn raw_input(&self) -> &str {
        &self.state.raw_input
    }

    pub fn suggestion(&self) -> &str {
        &self.state.suggestion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::SuggestionIndex;
    use crate::config::FallbackCity;
    use crate::places::PlaceRecord;

    fn autocompleter(records: &[PlaceRecord]) -> Arc<Autocompleter> {
        let ac = Autocompleter::new(
            vec!["wifi".to_string()],
            vec![
                FallbackCity::new("amsterdam", "Amsterdam"),
                FallbackCity::new("the-hague", "The Hague"),
            ],
        );
        ac.replace_index(SuggestionIndex::build(records));
        Arc::new(ac)
    }

    fn sample_records() -> Vec<PlaceRecord> {
        vec![
            PlaceRecord::new("1", "The Coffee Room", 4.7)
                .with_city("Rotterdam")
                .with_tags(["wifi"]),
            PlaceRecord::new("2", "Coffee Company", 4.3).with_city("Amsterdam"),
        ]
    }

    #[test]
    fn test_typing_and_clearing() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        assert_eq!(input.phase(), InputState::Idle);

        input.set_input("am");
        assert_eq!(input.phase(), InputState::Typing);
        assert_eq!(input.suggestion(), "Amsterdam");
        assert_eq!(input.state().suggestion_kind, Some(SuggestionKind::City));
        assert_eq!(input.ghost_text(), "sterdam");

        input.set_input("");
        assert_eq!(input.phase(), InputState::Idle);
        assert_eq!(input.state(), &InputSessionState::default());
    }

    #[test]
    fn test_tag_enter_submits_tag() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        input.set_input("wi");
        assert_eq!(input.suggestion(), "wifi");

        let outcome = input.handle_key(Key::Enter);
        assert!(outcome.prevent_default);
        assert_eq!(outcome.intent, Some(SearchIntent::tag("wifi")));
        assert_eq!(input.phase(), InputState::Submitted);
    }

    #[test]
    fn test_tab_accepts_suggestion() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        input.set_input("rot");

        let outcome = input.handle_key(Key::Tab);
        assert!(outcome.prevent_default);
        assert_eq!(outcome.intent, None);
        assert_eq!(input.raw_input(), "Rotterdam");
        assert_eq!(input.suggestion(), "");
        assert_eq!(input.ghost_text(), "");

        // The accepted city still resolves to its key
        let intent = input.submit();
        assert_eq!(intent, Some(SearchIntent::city("rotterdam")));
    }

    #[test]
    fn test_tab_without_suggestion_keeps_focus_behaviour() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        input.set_input("zzz");
        let outcome = input.handle_key(Key::Tab);
        assert!(!outcome.prevent_default);
        assert_eq!(input.raw_input(), "zzz");
    }

    #[test]
    fn test_escape_clears_only_suggestion() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        input.set_input("am");
        let outcome = input.handle_key(Key::Escape);
        assert!(!outcome.prevent_default);
        assert_eq!(input.raw_input(), "am");
        assert_eq!(input.suggestion(), "");

        assert_eq!(input.submit(), Some(SearchIntent::new("am", None)));
    }

    #[test]
    fn test_whitespace_never_submits() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        for text in ["", " ", "   ", "\t", " \t \n"] {
            input.set_input(text);
            assert_eq!(input.submit(), None);
            let outcome = input.handle_key(Key::Enter);
            assert!(outcome.prevent_default);
            assert_eq!(outcome.intent, None);
            assert_ne!(input.phase(), InputState::Submitted);
        }
    }

    #[test]
    fn test_place_match_has_no_kind() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        input.set_input("coffee c");
        assert_eq!(input.state().suggestion_kind, Some(SuggestionKind::Place));
        assert_eq!(
            input.submit(),
            Some(SearchIntent::new("Coffee Company", None))
        );
    }

    #[test]
    fn test_city_resolves_to_fallback_key() {
        // Index not populated yet: suggestions come from the fallback list
        let mut input = SearchInput::new(autocompleter(&[]));
        input.set_input("the h");
        assert_eq!(input.suggestion(), "The Hague");
        assert_eq!(input.ghost_text(), "ague");
        assert_eq!(input.submit(), Some(SearchIntent::city("the-hague")));
    }

    #[test]
    fn test_city_from_loaded_index_resolves_to_slug_key() {
        let records = vec![PlaceRecord::new("7", "Morning Brew", 4.8).with_city("The Hague")];
        let mut input = SearchInput::new(autocompleter(&records));
        input.set_input("the h");
        assert_eq!(input.suggestion(), "The Hague");
        assert_eq!(input.submit(), Some(SearchIntent::city("the-hague")));
    }

    #[test]
    fn test_unknown_input_submits_raw_text() {
        let mut input = SearchInput::new(autocompleter(&sample_records()));
        input.set_input("Paris ");
        assert_eq!(input.suggestion(), "");
        assert_eq!(input.submit(), Some(SearchIntent::new("Paris ", None)));
    }
}
