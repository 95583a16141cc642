mod config;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod store;
mod templates;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::LayoutRasterizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Export capture at {}x, session cap {}, idle TTL {}s",
        config.export_pixel_ratio, config.max_sessions, config.session_idle_ttl_secs
    );

    let state = AppState::new(config.clone(), Arc::new(LayoutRasterizer));

    // Idle sessions are also evicted on create.
    let sweep_period = (config.session_idle_ttl() / 4).max(Duration::from_secs(1));
    state.sessions.spawn_sweeper(sweep_period);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
