use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamebutler::api::{create_router, AppState};
use gamebutler::config::Config;
use gamebutler::error::LoadError;
use gamebutler::services::{loader, Recommender};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamebutler=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Start without a library rather than refusing to serve
    let state = match loader::load(Path::new(&config.library_path)) {
        Ok(library) => AppState::with_recommender(Recommender::new(library)),
        Err(LoadError::NotFound(path)) => {
            tracing::warn!(path = %path.display(), "Default library not found, starting empty");
            AppState::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load default library, starting empty");
            AppState::new()
        }
    }
    .with_upload_dir(&config.upload_dir)
    .with_upload_max_bytes(config.upload_max_bytes);

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
