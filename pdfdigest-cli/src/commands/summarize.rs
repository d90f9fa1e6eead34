//! `pdfdigest summarize` - summarize a local PDF without a server

use anyhow::{bail, Result};
use pdfdigest_core::summarize::{summarize, SummaryKind, SummaryMode};
use pdfdigest_core::{pdf, CompletionClient, Config};
use std::path::PathBuf;
use tracing::info;

pub async fn run(config: Config, file: PathBuf, mode: String) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let mode = SummaryMode::parse(&mode);
    info!("Summarizing {} in {} mode", file.display(), mode);

    let bundle = pdf::extract(&file)?;
    if bundle.is_empty() {
        bail!("No extractable text in {}", file.display());
    }

    let client = CompletionClient::new(&config.completion)?;
    let summary = summarize(&client, &bundle, mode).await;

    match summary.kind {
        SummaryKind::Mock => {
            eprintln!("note: no API key configured, this is a mock summary\n")
        }
        SummaryKind::Degraded => {
            eprintln!("note: the completion call failed, see below\n")
        }
        SummaryKind::Generated => {}
    }

    println!("{}", summary.text);

    Ok(())
}
