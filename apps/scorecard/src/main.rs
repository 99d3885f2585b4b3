mod config;
mod errors;
mod gateway;
mod models;
mod report;
mod routes;
mod session;
mod state;
mod store;
mod visual;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::AnalysisGateway;
use crate::report::ReportLayout;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{RedisBackend, ResultStore};

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

    info!("Starting Scorecard v{}", env!("CARGO_PKG_VERSION"));

    // Result Store: Redis when configured, in-process otherwise
    let store = match &config.redis_url {
        Some(url) => {
            let backend = RedisBackend::connect(url)
                .await
                .context("Failed to connect to Redis")?;
            ResultStore::new(Arc::new(backend), config.session_ttl)
        }
        None => {
            info!("REDIS_URL not set; keeping results in memory");
            ResultStore::in_memory(config.session_ttl)
        }
    };

    // Analysis Gateway
    let gateway = AnalysisGateway::new(&config.analysis_service_url, config.analysis_timeout)
        .context("Failed to build analysis HTTP client")?;
    info!(
        "Analysis service: {} (timeout {:?})",
        config.analysis_service_url,
        gateway.timeout()
    );

    let report_layout = ReportLayout::default().with_overflow(config.report_overflow);
    info!("Report overflow policy: {:?}", report_layout.overflow);

    let state = AppState {
        gateway,
        store,
        config: config.clone(),
        report_layout,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser views are served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
