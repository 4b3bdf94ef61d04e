//! Web server module
//!
//! Server-rendered pages for the search bar and results, plus the JSON
//! endpoints the page script calls for suggestions and loading cards.

mod handlers;
mod routes;
mod state;
mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
