mod cache;
mod config;
mod errors;
mod pricing;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{spawn_sweeper, EstimateCache, SystemClock};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Print Quote API v{}", env!("CARGO_PKG_VERSION"));

    // Shared memoization layer on the wall clock; the sweeper drops expired
    // entries for the lifetime of the process.
    let cache = Arc::new(EstimateCache::new(
        chrono::Duration::minutes(config.cache_ttl_minutes as i64),
        Arc::new(SystemClock),
    ));
    spawn_sweeper(
        cache.clone(),
        std::time::Duration::from_secs(config.cache_sweep_interval_minutes * 60),
    );
    info!(
        ttl_minutes = config.cache_ttl_minutes,
        sweep_minutes = config.cache_sweep_interval_minutes,
        "Estimate cache initialized"
    );

    let state = AppState { cache };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
