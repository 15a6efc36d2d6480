use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    pokemon::{Pokemon, PokemonService},
    storage::JsonFileStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse().map_err(|_| StartupError::InvalidAddr(raw))
}

/// Wire the JSON file store into the service and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_env(&cfg.storage.static_dir, &cfg.storage.data_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let store = JsonFileStore::<Pokemon>::new(&cfg.storage.data_file).await?;
    info!(data_file = %store.path().display(), "collection store ready");

    let state = AppState::new(PokemonService::new(store));
    Ok(routes::build_router(state, build_cors(), &cfg.storage.static_dir))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = load_bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(%addr, "pokedex server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
