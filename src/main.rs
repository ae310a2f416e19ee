// ABOUTME: Entry point for the ptlog binary.
// ABOUTME: Loads configuration, initializes tracing, opens the session, runs one command, and closes it.

mod cli;
mod config;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ptlog_store::DirectoryService;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Status};
use crate::config::{DbLocation, PtlogConfig};

const DEFAULT_LOG_FILTER: &str = "ptlog=info,ptlog_store=info";

/// Pick the first directive that parses: the configured one, then
/// `RUST_LOG`, then the built-in default.
fn resolve_filter(configured: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    configured
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| rust_log.and_then(|directive| EnvFilter::try_new(directive).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing(config: &PtlogConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(config.log_filter.as_deref(), rust_log.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_service(config: &PtlogConfig) -> anyhow::Result<DirectoryService> {
    match &config.db {
        DbLocation::Memory => {
            DirectoryService::open_in_memory().context("opening in-memory database")
        }
        DbLocation::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating data directory {}", parent.display()))?;
            }
            DirectoryService::open(path)
                .with_context(|| format!("opening database {}", path.display()))
        }
    }
}

/// Combine the command result with the close result. A command failure
/// wins; a close failure behind it is logged rather than lost.
fn settle(result: anyhow::Result<Status>, closed: anyhow::Result<()>) -> anyhow::Result<Status> {
    match (result, closed) {
        (Ok(status), Ok(())) => Ok(status),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            tracing::warn!("{close_err:#}");
            Err(err)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = PtlogConfig::from_env()?.with_db_override(cli.db.clone());
    init_tracing(&config);
    tracing::debug!(
        "data directory {}, database {:?}",
        config.home.display(),
        config.db
    );

    let mut service = open_service(&config)?;
    let result = cli::run(&cli, &mut service, &mut std::io::stdout().lock());

    // Release the session on every exit path before reporting
    let closed = service.close().context("closing database");
    let status = settle(result, closed)?;

    Ok(match status {
        Status::Success => ExitCode::SUCCESS,
        Status::Failed => ExitCode::FAILURE,
    })
}
