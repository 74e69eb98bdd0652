use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{LinkConfig, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application over a freshly seeded person store.
pub fn build_app(cfg: &AppConfig) -> Router {
    let links = LinkConfig {
        public_base_url: cfg.server.public_base_url.clone(),
        fallback_authority: cfg.server.bind_addr(),
    };
    routes::build_router(ServerState::seeded(links), build_cors())
}

/// Bind the configured address. Host names are resolved.
pub async fn bind(cfg: &AppConfig) -> Result<tokio::net::TcpListener, StartupError> {
    let addr = cfg.server.bind_addr();
    tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

/// Public entry: build the app and run the HTTP server until it fails.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let listener = bind(&cfg).await?;
    let app = build_app(&cfg);

    let addr = listener.local_addr().map_err(StartupError::Serve)?;
    info!(%addr, event = "listening", "starting person directory server");
    axum::serve(listener, app).await.map_err(StartupError::Serve)?;
    Ok(())
}
