//! Search input handling
//!
//! The text-entry state machine behind the search bar: keystrokes update
//! the suggestion, Tab accepts it, Escape dismisses it, Enter submits.

mod controller;

pub use controller::{InputSessionState, InputState, Key, KeyOutcome, SearchInput};
