//! `pdfdigest serve` - run the HTTP API server

use anyhow::Result;
use pdfdigest_core::server::{create_router, AppState};
use pdfdigest_core::{CompletionClient, Config, UploadStore};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run(config: Config) -> Result<()> {
    config.ensure_dirs()?;

    let client = CompletionClient::new(&config.completion)?;
    if !client.has_credentials() {
        warn!(
            "No completion-service API key configured (PDFDIGEST_API_KEY); \
             summaries will be mocked"
        );
    }

    let store = UploadStore::new(config.upload_dir());
    store.ensure_dir()?;
    info!("Upload directory: {}", store.root().display());

    let addr = config.server_addr();
    let state = Arc::new(AppState::new(config, client, store));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("PDF Digest API listening on http://{addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
