//! HTTP networking module
//!
//! Provides the HTTP client used to reach the places API.

mod client;

pub use client::{ApiResponse, HttpClient};
