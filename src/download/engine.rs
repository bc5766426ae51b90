//! Worker pool that drains the work queue with a fixed number of tasks.
//!
//! This module provides the `FetchEngine` which spawns a dispatcher task and
//! exactly `threads` worker tasks sharing one [`WorkQueue`]. Each worker runs
//! every item it takes through the same state machine:
//!
//! 1. no URL -> [`ItemOutcome::NoUri`]
//! 2. destination file present -> [`ItemOutcome::AlreadyExisted`]
//! 3. fetch the high-resolution URL -> [`ItemOutcome::Downloaded`] or
//!    [`ItemOutcome::Errored`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use painting_core::download::{FetchEngine, HttpClient};
//! use painting_core::queue::WorkItem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = FetchEngine::new(20, "data/downloaded", Arc::new(HttpClient::new()?))?;
//! let summary = engine
//!     .run(vec![WorkItem::new(2, "https://example.com/200,200/2.jpg")])
//!     .await?;
//! println!("downloaded: {}, errored: {}", summary.downloaded, summary.errored);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, instrument, warn};

use super::fetcher::Fetcher;
use super::stats::{DownloadStats, DownloadSummary, ItemOutcome};
use super::storage::destination_exists;
use crate::queue::{WorkItem, WorkQueue, upgrade_resolution};

/// Minimum allowed worker count.
const MIN_THREADS: usize = 1;

/// Maximum allowed worker count. Deliberate cap: one open connection per worker.
const MAX_THREADS: usize = 256;

/// Default worker count if not specified.
pub const DEFAULT_THREADS: usize = 20;

/// Error type for fetch engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid worker count provided.
    #[error("invalid thread count {value}: must be between {MIN_THREADS} and {MAX_THREADS}")]
    InvalidThreads {
        /// The invalid value that was provided.
        value: usize,
    },

    /// The dispatcher task panicked or was cancelled.
    #[error("dispatcher task failed: {0}")]
    Dispatcher(#[from] tokio::task::JoinError),
}

/// Fixed-size worker pool for fetching painting images.
///
/// # Concurrency Model
///
/// - One dispatcher task feeds a bounded queue
/// - Exactly `threads` worker tasks drain it; each handles one item at a time
/// - Counters live in a [`DownloadStats`] owned by the `run()` call
/// - `run()` returns only after every worker has joined
///
/// Each worker writes a distinct `<id>.jpg`, so workers never contend on a
/// file.
pub struct FetchEngine {
    threads: usize,
    images_dir: PathBuf,
    fetcher: Arc<dyn Fetcher>,
    progress: Option<ProgressBar>,
}

impl std::fmt::Debug for FetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchEngine")
            .field("threads", &self.threads)
            .field("images_dir", &self.images_dir)
            .finish_non_exhaustive()
    }
}

impl FetchEngine {
    /// Creates a new engine writing into `images_dir`.
    ///
    /// # Arguments
    ///
    /// * `threads` - Number of concurrent workers (1-256)
    /// * `images_dir` - Directory receiving `<id>.jpg` files; must exist
    /// * `fetcher` - Shared fetcher used by every worker
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidThreads`] if the value is outside
    /// the valid range (1-256).
    #[instrument(level = "debug", skip(images_dir, fetcher))]
    pub fn new(
        threads: usize,
        images_dir: impl Into<PathBuf>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, EngineError> {
        if !(MIN_THREADS..=MAX_THREADS).contains(&threads) {
            return Err(EngineError::InvalidThreads { value: threads });
        }

        let images_dir = images_dir.into();
        debug!(threads, images_dir = %images_dir.display(), "creating fetch engine");

        Ok(Self {
            threads,
            images_dir,
            fetcher,
            progress: None,
        })
    }

    /// Ticks `bar` once for every processed item.
    #[must_use]
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Returns the configured worker count.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Returns the output directory.
    #[must_use]
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Runs every item through the worker pool and returns the final counts.
    ///
    /// Individual fetch failures do NOT cause this method to error; they are
    /// logged and counted as `errored`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Dispatcher`] if the dispatcher task panicked.
    #[instrument(skip(self, items), fields(threads = self.threads, images_dir = %self.images_dir.display()))]
    pub async fn run<I>(&self, items: I) -> Result<DownloadSummary, EngineError>
    where
        I: IntoIterator<Item = WorkItem>,
        I::IntoIter: Send + 'static,
    {
        let stats = Arc::new(DownloadStats::new());
        let (queue, dispatcher) = WorkQueue::dispatch(items);

        info!("starting workers");

        let mut handles = Vec::with_capacity(self.threads);
        for worker in 0..self.threads {
            let queue = queue.clone();
            let stats = Arc::clone(&stats);
            let fetcher = Arc::clone(&self.fetcher);
            let images_dir = self.images_dir.clone();
            let progress = self.progress.clone();

            handles.push(tokio::spawn(async move {
                let mut processed = 0usize;
                while let Some(item) = queue.next().await {
                    let outcome = process_item(fetcher.as_ref(), &images_dir, &item).await;
                    stats.record(outcome);
                    if let Some(bar) = &progress {
                        bar.inc(1);
                    }
                    processed += 1;
                }
                debug!(worker, processed, "worker drained queue");
            }));
        }
        // Workers hold the only remaining receivers, so the dispatcher stops
        // if they all exit early.
        drop(queue);

        for handle in handles {
            // Ignore JoinError - task panics are logged but don't fail the batch
            if let Err(e) = handle.await {
                warn!(error = %e, "worker task panicked");
            }
        }

        let dispatched = dispatcher.await?;
        let summary = stats.summary();

        if summary.total() != dispatched as u64 {
            warn!(
                dispatched,
                processed = summary.total(),
                "not every dispatched item was processed"
            );
        }

        info!(
            already_existed = summary.already_existed,
            errored = summary.errored,
            no_uri = summary.no_uri,
            downloaded = summary.downloaded,
            total = summary.total(),
            "queue processing complete"
        );

        Ok(summary)
    }
}

/// Runs one item through the skip / fetch state machine.
#[instrument(skip(fetcher, images_dir, item), fields(id = item.id))]
pub(crate) async fn process_item(
    fetcher: &dyn Fetcher,
    images_dir: &Path,
    item: &WorkItem,
) -> ItemOutcome {
    if !item.has_url() {
        info!(title = %item.title, artist = %item.artist, "no URI for painting");
        return ItemOutcome::NoUri;
    }

    let destination = item.destination(images_dir);
    if destination_exists(&destination).await {
        debug!(path = %destination.display(), "already downloaded, skipping");
        return ItemOutcome::AlreadyExisted;
    }

    let url = upgrade_resolution(&item.url);
    info!(url = %url, path = %destination.display(), "downloading");

    match fetcher.fetch(&url, &destination).await {
        Ok(bytes) => {
            debug!(bytes, "download completed");
            ItemOutcome::Downloaded
        }
        Err(e) => {
            warn!(url = %url, error = %e, "download failed");
            ItemOutcome::Errored
        }
    }
}
