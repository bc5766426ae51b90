//! CLI entry point for the painting downloader.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use painting_core::download::storage::ensure_dir;
use painting_core::{FetchEngine, HttpClient, WorkItem, load_paintings};
use tracing::{debug, info};

mod cli;
mod progress;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    // CSV parsing is blocking; keep it off the runtime workers
    let opendata_dir = args.opendata_dir.clone();
    let paintings = tokio::task::spawn_blocking(move || load_paintings(&opendata_dir))
        .await
        .context("catalog loader task failed")?
        .with_context(|| {
            format!(
                "failed to load paintings from {}",
                args.opendata_dir.display()
            )
        })?;

    ensure_dir(&args.images_dir).await.with_context(|| {
        format!(
            "failed to create images directory {}",
            args.images_dir.display()
        )
    })?;

    info!(paintings = paintings.len(), "have paintings");

    let client = HttpClient::new().context("failed to initialise HTTP client")?;
    let mut engine = FetchEngine::new(
        usize::from(args.threads),
        args.images_dir.clone(),
        Arc::new(client),
    )?;

    let bar = progress::build_progress_bar(paintings.len(), !args.quiet && !args.no_progress);
    if let Some(bar) = &bar {
        engine = engine.with_progress(bar.clone());
    }

    let items: Vec<WorkItem> = paintings.into_iter().map(WorkItem::from).collect();
    let summary = engine.run(items).await?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    info!(
        already_existed = summary.already_existed,
        errored = summary.errored,
        no_uri = summary.no_uri,
        downloaded = summary.downloaded,
        total = summary.total(),
        "stats: {summary}"
    );

    Ok(())
}
