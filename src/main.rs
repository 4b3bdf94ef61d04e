//! Coffee Finder web server entry point

use anyhow::Result;
use coffee_finder::{
    config,
    network::HttpClient,
    places::PlacesClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Coffee Finder v{}", coffee_finder::VERSION);

    let settings = config::load()?;
    info!(
        "Loaded configuration for instance: {}",
        settings.general.instance_name
    );

    let http = HttpClient::with_settings(&settings.api)?;
    let client = PlacesClient::new(http, &settings.api.base_url, settings.search.tags.clone())?;

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, Arc::new(client))?;
    state.spawn_refresh();

    let app = create_router(state);

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
