//! IPC entry point for PromptDock
//!
//! Serves the storage operations to the desktop UI process as newline-delimited
//! JSON over stdio. Logs go to stderr, stdout carries only responses.

mod cli;
mod commands;
mod error;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use promptdock_app::adapters::JsonDocumentStore;
use promptdock_app::AppStateBuilder;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing to stderr (stdout is the protocol channel)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = cli.storage_paths();
    tracing::info!(
        "Starting PromptDock IPC server (document: {}, backups: {})",
        paths.document_path.display(),
        paths.backup_dir.display()
    );

    let state = AppStateBuilder::new()
        .document_store(Arc::new(JsonDocumentStore::new(paths)))
        .build()?;
    state
        .initialize()
        .await
        .context("Failed to initialize storage")?;

    tracing::info!("Serving requests on stdio");
    server::serve(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
