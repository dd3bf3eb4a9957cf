use axum::Router;
use configs::AppConfig;
use service::{storage::open_store, BookingService};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured store and assemble the router around it.
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let backend = cfg.storage.backend.as_str();
    let store = open_store(backend)
        .ok_or_else(|| StartupError::InvalidConfig(format!("unknown storage backend '{backend}'")))?;
    info!(storage.backend = backend, "store opened");

    let state = AppState::new(BookingService::new(store));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve it until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
