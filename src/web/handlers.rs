//! HTTP request handlers

use super::state::AppState;
use crate::input::{Key, SearchInput};
use crate::places::SearchFilters;
use crate::search::{IntentKind, ResultsView, SearchIntent, SearchOutcome, SortOrder};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tera::Context;

/// Shortcut link on the home page
#[derive(Debug, Serialize)]
struct QuickLink {
    label: String,
    href: String,
}

fn search_href(value: &str, kind: IntentKind, sid: &str) -> String {
    format!(
        "/search?q={}&kind={}&sid={}",
        urlencoding::encode(value),
        kind.as_str(),
        urlencoding::encode(sid)
    )
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let sid = uuid::Uuid::new_v4().to_string();
    let tags = state.available_tags();

    let mut quick: Vec<QuickLink> = state
        .known_cities()
        .into_iter()
        .take(3)
        .map(|city| QuickLink {
            href: search_href(&city, IntentKind::City, &sid),
            label: city,
        })
        .collect();
    quick.extend(tags.iter().map(|tag| QuickLink {
        href: search_href(tag, IntentKind::Tag, &sid),
        label: tag.clone(),
    }));

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("docs_url", &state.settings.general.docs_url);
    ctx.insert("sid", &sid);
    ctx.insert("quick_links", &quick);
    ctx.insert("query", "");
    ctx.insert("filters", &SearchFilters::default());

    match state.templates.render_with_context("index.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    /// Text as typed
    pub q: Option<String>,
    /// Explicit kind (city or tag), used by quick links
    pub kind: Option<String>,
    /// Set when the user dismissed the suggestion before submitting
    pub dismissed: Option<String>,
    /// Browser session id
    pub sid: Option<String>,
    /// Result ordering
    pub sort: Option<String>,
    /// Minimum rating, 0 to 5
    pub min_rating: Option<String>,
    /// Open at or after HH:MM
    pub open_after: Option<String>,
    /// Open at or before HH:MM
    pub open_before: Option<String>,
    /// Output format
    pub format: Option<String>,
}

/// Search results response for JSON format
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub intent: SearchIntent,
    pub sort: SortOrder,
    pub filters: SearchFilters,
    pub number_of_results: usize,
    #[serde(flatten)]
    pub view: ResultsView,
}

/// Run the text through the search bar state machine, as if Enter was pressed
fn intent_from_text(state: &AppState, text: &str, dismissed: bool) -> Option<SearchIntent> {
    let mut input = SearchInput::new(state.autocompleter.clone());
    input.set_input(text);
    if dismissed {
        input.handle_key(Key::Escape);
    }
    input.handle_key(Key::Enter).intent
}

/// Filters as this server's own form field names
fn filter_pairs(filters: &SearchFilters) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(rating) = filters.min_rating {
        pairs.push(("min_rating", rating.to_string()));
    }
    if let Some(ref after) = filters.open_after {
        pairs.push(("open_after", after.clone()));
    }
    if let Some(ref before) = filters.open_before {
        pairs.push(("open_before", before.clone()));
    }
    pairs
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Response {
    let raw_query = params.q.unwrap_or_default();

    let intent = match params.kind.as_deref().and_then(IntentKind::parse) {
        Some(kind) if !raw_query.trim().is_empty() => {
            Some(SearchIntent::new(raw_query.trim(), Some(kind)))
        }
        _ => intent_from_text(&state, &raw_query, params.dismissed.is_some()),
    };
    let Some(intent) = intent else {
        return Redirect::to("/").into_response();
    };

    let sort = params
        .sort
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();

    let filters = SearchFilters::from_form(
        params.min_rating.as_deref(),
        params.open_after.as_deref(),
        params.open_before.as_deref(),
    );

    let known_cities = state.known_cities();
    let outcome = match params.sid.as_deref().filter(|s| !s.is_empty()) {
        Some(sid) => {
            let session = state.sessions.session(sid).await;
            session
                .execute(&intent, &known_cities, &filters, sort)
                .await
        }
        None => {
            state
                .sessions
                .detached()
                .execute(&intent, &known_cities, &filters, sort)
                .await
        }
    };

    let view = match outcome {
        SearchOutcome::Completed(view) => view,
        SearchOutcome::Superseded => {
            return (StatusCode::CONFLICT, "A newer search replaced this one").into_response();
        }
    };

    if params.format.as_deref() == Some("json") {
        let response = SearchResponse {
            query: raw_query,
            number_of_results: view.count(),
            intent,
            sort,
            filters,
            view,
        };
        return Json(response).into_response();
    }

    let sid = params.sid.unwrap_or_default();
    let toggle = sort.toggled();
    let mut toggle_href = format!(
        "/search?q={}&sort={}&sid={}",
        urlencoding::encode(&intent.value),
        toggle.as_str(),
        urlencoding::encode(&sid)
    );
    if let Some(kind) = intent.kind {
        toggle_href.push_str(&format!("&kind={}", kind.as_str()));
    }
    for (key, value) in filter_pairs(&filters) {
        toggle_href.push_str(&format!("&{}={}", key, urlencoding::encode(&value)));
    }

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("query", &intent.value);
    ctx.insert("sid", &sid);
    ctx.insert("sort", sort.as_str());
    ctx.insert("toggle_sort", toggle.as_str());
    ctx.insert("toggle_href", &toggle_href);
    ctx.insert("filters", &filters);
    ctx.insert("result_count", &view.count());
    ctx.insert("view", &view);

    match state.templates.render_with_context("search.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Autocomplete parameters
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub q: String,
}

/// Autocomplete response
#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub query: String,
    pub suggestion: String,
    pub kind: Option<crate::autocomplete::SuggestionKind>,
    pub ghost: String,
}

/// Autocomplete handler
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> impl IntoResponse {
    state.metrics.record_autocomplete();

    let mut input = SearchInput::new(state.autocompleter.clone());
    input.set_input(&params.q);

    Json(AutocompleteResponse {
        ghost: input.ghost_text(),
        suggestion: input.suggestion().to_string(),
        kind: input.state().suggestion_kind,
        query: params.q,
    })
}

/// City list handler
pub async fn cities(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.repo.list_cities().await)
}

/// Loading placeholder handler
pub async fn skeleton(State(state): State<AppState>) -> Response {
    let card = state.skeleton.sample(&mut rand::thread_rng());
    match card {
        Some(card) => Json(card).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let index = state.autocompleter.snapshot();
    Json(serde_json::json!({
        "searches": state.metrics.snapshot(),
        "index": {
            "cities": index.city_count(),
            "tags": index.tags().count(),
            "places": index.place_names().count(),
        },
        "sessions": state.sessions.size(),
        "skeleton_pool": state.skeleton.len(),
    }))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Robots.txt handler
pub async fn robots_txt() -> impl IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain")],
        "User-agent: *\nAllow: /\nDisallow: /search\n",
    )
}

/// Favicon handler
pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
