//! Per-run download statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Result of running one work item through the worker state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item has no image URL; nothing was fetched.
    NoUri,
    /// A file was already present at the destination; nothing was fetched.
    AlreadyExisted,
    /// The image was fetched and written to disk.
    Downloaded,
    /// The fetch was attempted and failed.
    Errored,
}

impl ItemOutcome {
    /// Returns the log label for this outcome.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoUri => "no_uri",
            Self::AlreadyExisted => "already_existed",
            Self::Downloaded => "downloaded",
            Self::Errored => "errored",
        }
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Statistics from a download batch run.
///
/// One instance is owned by each `FetchEngine::run()` invocation and shared
/// with its workers through an `Arc`. Workers only ever increment; the
/// counters are read back through [`summary`](Self::summary) once every
/// worker has joined.
#[derive(Debug, Default)]
pub struct DownloadStats {
    already_existed: AtomicU64,
    errored: AtomicU64,
    no_uri: AtomicU64,
    downloaded: AtomicU64,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter matching `outcome`.
    pub fn record(&self, outcome: ItemOutcome) {
        let counter = match outcome {
            ItemOutcome::NoUri => &self.no_uri,
            ItemOutcome::AlreadyExisted => &self.already_existed,
            ItemOutcome::Downloaded => &self.downloaded,
            ItemOutcome::Errored => &self.errored,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Reads back all four counters.
    #[must_use]
    pub fn summary(&self) -> DownloadSummary {
        DownloadSummary {
            already_existed: self.already_existed.load(Ordering::SeqCst),
            errored: self.errored.load(Ordering::SeqCst),
            no_uri: self.no_uri.load(Ordering::SeqCst),
            downloaded: self.downloaded.load(Ordering::SeqCst),
        }
    }
}

/// Final counts of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Items skipped because the destination file was already present.
    pub already_existed: u64,
    /// Items whose fetch failed.
    pub errored: u64,
    /// Items without an image URL.
    pub no_uri: u64,
    /// Items fetched successfully.
    pub downloaded: u64,
}

impl DownloadSummary {
    /// Returns the number of items processed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.already_existed + self.errored + self.no_uri + self.downloaded
    }
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "already_existed={} errored={} no_uri={} downloaded={} total={}",
            self.already_existed,
            self.errored,
            self.no_uri,
            self.downloaded,
            self.total()
        )
    }
}
