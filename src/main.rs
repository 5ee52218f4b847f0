// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::application::controller::DashboardController;
use crate::application::registry::CardRegistry;
use crate::application::schema::default_cards;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_backend::HttpBackend;
use crate::infrastructure::session::Session;
use crate::presentation::app_state::AppState;
use crate::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ops_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Session and backend client (infrastructure layer)
    let session = Arc::new(Session::new(config.backend.token.clone()));
    let backend = Arc::new(HttpBackend::new(&config.backend, session.clone())?);

    // Controller starts in Loading and serves the skeleton until mounted
    let state = Arc::new(AppState {
        controller: Mutex::new(DashboardController::new(default_cards())),
        registry: CardRegistry::builtin(),
        breakpoints: config.grid.breakpoints.clone(),
        data: backend.clone(),
        store: backend,
        session,
    });

    // Serve the skeleton while the first load runs; reload is refused until it lands
    let mount_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = mount_state.mount().await {
            tracing::warn!(error = %e, "initial dashboard mount skipped");
        }
    });

    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!(%addr, backend = %config.backend.base_url, "starting ops-dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(error = %e, %addr, "failed to bind listener");
        e
    })?;
    axum::serve(listener, router).await?;

    Ok(())
}
