//! portal_server — serves the employee portal.
//!
//! Configuration comes from flags or environment variables (see
//! `portal_server --help`); a `.env` file in the working directory is loaded
//! first when present.

use anyhow::Context;
use clap::Parser;
use hero_portal::{build_router, AppState, PortalConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hero_portal=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortalConfig::parse();
    tracing::info!("Starting Hero Portal with {:?}", config);

    let bind_addr = config.bind_addr.clone();
    let state = AppState::from_config(config).context("failed to build portal state")?;
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
