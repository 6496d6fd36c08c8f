//! LexLens Server
//!
//! HTTP surface for the document analysis pipeline: one upload endpoint and
//! a health check. Model clients, the store, and the staging area are built
//! once at startup and injected into a single shared pipeline instance.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use lexlens_ingest::StagingArea;
use lexlens_models::{NerClient, SummarizerClient};
use lexlens_pipeline::AnalysisPipeline;
use lexlens_store::SqliteStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store initialization error
    #[error("Store error: {0}")]
    Store(#[from] lexlens_store::StoreError),

    /// Server binding or filesystem bootstrap error
    #[error("Failed to start server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the analysis HTTP server
///
/// Loads the configuration, creates the staging directory, opens the store,
/// builds the model clients, and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting LexLens server");
    info!("Bind address: {}", config.bind_addr());
    info!("Staging directory: {}", config.staging_dir.display());
    info!("Database: {}", config.database_path.display());
    info!(
        "Summarizer: {} ({})",
        config.summarizer_endpoint, config.summarizer_model
    );
    info!("NER: {} ({})", config.ner_endpoint, config.ner_model);

    // File-system bootstrap: the staging directory must exist before the
    // first upload arrives
    let staging = StagingArea::new(&config.staging_dir);
    staging.ensure_exists().await?;

    let store = SqliteStore::new(&config.database_path)?;

    let summarizer = SummarizerClient::new(&config.summarizer_endpoint, &config.summarizer_model)
        .with_timeout(config.pipeline.stage_timeout());
    let recognizer = NerClient::new(&config.ner_endpoint, &config.ner_model)
        .with_timeout(config.pipeline.stage_timeout());

    let pipeline = AnalysisPipeline::new(
        summarizer,
        recognizer,
        store,
        staging,
        config.pipeline.clone(),
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = create_router(state, config.max_upload_bytes);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("LexLens listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_port, 8000);
        assert!(config.pipeline.validate().is_ok());
    }
}
