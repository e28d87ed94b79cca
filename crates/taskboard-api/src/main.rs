//! Taskboard API Server

use std::sync::Arc;
use taskboard_api::{create_router, state::AppState};
use taskboard_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: a missing JWT_SECRET must abort startup
    // before anything is served.
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state and router
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Taskboard API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
