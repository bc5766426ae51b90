//! Constants for the download module (timeouts, partial files).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default overall request timeout (5 minutes for large images).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Suffix appended to the destination filename while a download is in flight.
pub const PARTIAL_SUFFIX: &str = ".part";
