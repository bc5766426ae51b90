//! HTTP client wrapper for downloading images.
//!
//! This module provides the `HttpClient` struct which handles streaming
//! downloads with proper timeout configuration and error handling.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, PARTIAL_SUFFIX, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use super::fetcher::Fetcher;
use crate::user_agent;

/// HTTP client for downloading files with streaming support.
///
/// This client is designed to be created once and shared by every worker,
/// taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use painting_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let bytes = client
///     .download_to_file("https://example.com/1600,1600/42.jpg", Path::new("./42.jpg"))
///     .await?;
/// println!("Downloaded {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Request timeout: 5 minutes (for large files)
    /// - Gzip decompression: enabled
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend or system
    /// configuration cannot be initialised.
    pub fn new() -> Result<Self, DownloadError> {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the client cannot be built.
    #[instrument(level = "debug")]
    pub fn new_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_download_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Downloads `url` into exactly `destination`.
    ///
    /// The body is streamed into `<destination>.part` and renamed onto
    /// `destination` only after the last byte has been flushed. On any error
    /// the partial file is removed and `destination` is left untouched.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server answers with any status other than 200
    /// - Writing or renaming the file fails
    #[instrument(skip(self), fields(url = %url, path = %destination.display()))]
    pub async fn download_to_file(
        &self,
        url: &str,
        destination: &Path,
    ) -> Result<u64, DownloadError> {
        debug!("starting download");

        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::transport(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let part_path = partial_path(destination);
        let mut file = File::create(&part_path)
            .await
            .map_err(|e| DownloadError::io(part_path.clone(), e))?;

        // Stream response body to the partial file, with cleanup on error
        let written = match stream_to_file(&mut file, response, url, &part_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                drop(file);
                discard_partial(&part_path).await;
                return Err(e);
            }
        };
        drop(file);

        if let Err(e) = tokio::fs::rename(&part_path, destination).await {
            discard_partial(&part_path).await;
            return Err(DownloadError::io(destination.to_path_buf(), e));
        }

        debug!(bytes = written, "download complete");
        Ok(written)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        self.download_to_file(url, destination).await
    }
}

/// Returns the in-flight path for `destination` (`42.jpg` -> `42.jpg.part`).
pub(crate) fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

async fn discard_partial(part_path: &Path) {
    debug!(path = %part_path.display(), "cleaning up partial file after error");
    let _ = tokio::fs::remove_file(part_path).await;
}

/// Copies the response body into the `.part` file and returns its length.
///
/// The caller owns the `.part` lifecycle: it renames on `Ok` and removes the
/// file on `Err`, so nothing here touches the final destination.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::transport(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Everything must reach the .part file before it is renamed into place
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
