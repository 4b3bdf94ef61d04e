//! Search orchestration module
//!
//! Resolves submitted intents to API parameters and runs them inside a
//! per-user session that handles display timing and stale responses.

mod executor;
mod models;

pub use executor::{SearchSession, MIN_DISPLAY_TIME};
pub use models::*;
