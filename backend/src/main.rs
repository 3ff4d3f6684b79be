//! Food Distribution Inventory Platform - Backend Server
//!
//! Serves the warehouse, lot, purchase order, product, supplier and
//! demand projection domains from one process.

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_platform_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inv_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Food Distribution Inventory Platform Server");
    tracing::info!("Environment: {}", config.environment);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Create application state and router
    let state = AppState::new(config);
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
