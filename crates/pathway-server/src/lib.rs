//! pathway-server — HTTP service for submitting assessments and reading
//! records, exports and reports.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};

use pathway_core::Assessor;
use pathway_store::SqliteStore;

pub use auth::AdminGate;
pub use config::{load_config, load_config_from, PathwayConfig};
pub use error::ApiError;
pub use server::{create_router, AppState};

/// Open the configured store and build handler state.
pub async fn build_state(config: &PathwayConfig) -> Result<AppState> {
    let store = SqliteStore::open(&config.database_path).await?;
    let assessor = Assessor::new(Arc::new(store), config.validation_policy());
    Ok(AppState::new(
        assessor,
        AdminGate::new(config.admin_secret.clone()),
        config.branding.clone(),
    ))
}

/// Serve the API until interrupted.
pub async fn serve(config: PathwayConfig) -> Result<()> {
    let state = build_state(&config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(
        "pathway listening on http://{} (database {})",
        listener.local_addr()?,
        config.database_path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("pathway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
