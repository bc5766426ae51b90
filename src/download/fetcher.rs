//! The single-item fetch seam used by the worker pool.

use std::path::Path;

use async_trait::async_trait;

use super::DownloadError;

/// Retrieves one URL into one destination file.
///
/// Implementations must not leave a file at `destination` when they return
/// an error, so that the pool's existence check never mistakes a failed
/// attempt for a completed download.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and writes the full body to `destination`.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] on transport failure, non-200 status, or
    /// when the destination cannot be written.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, DownloadError>;
}
