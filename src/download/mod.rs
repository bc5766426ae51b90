//! HTTP fetching and the concurrent worker pool.
//!
//! This module provides functionality for downloading painting images to
//! disk with a fixed number of concurrent workers.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Partial files are written to `<name>.part` and renamed into place
//! - Configurable timeouts (30s connect, 5min overall by default)
//! - Structured error types with full context
//! - Idempotent skip of images that already exist on disk
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use painting_core::download::{FetchEngine, HttpClient};
//! use painting_core::queue::WorkItem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpClient::new()?);
//! let engine = FetchEngine::new(20, "data/downloaded", client)?;
//! let items = vec![WorkItem::new(1, "https://example.com/200,200/1.jpg")];
//! let summary = engine.run(items).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod fetcher;
mod stats;
pub mod storage;

pub use client::HttpClient;
pub use engine::{DEFAULT_THREADS, EngineError, FetchEngine};
pub use error::DownloadError;
pub use fetcher::Fetcher;
pub use stats::{DownloadStats, DownloadSummary, ItemOutcome};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
