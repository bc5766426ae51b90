//! Painting Downloader Core Library
//!
//! This library provides the core functionality for bulk-downloading painting
//! images listed in the National Gallery of Art open data CSV files.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Loading paintings and joining their published image URIs
//! - [`queue`] - Work items and the dispatcher feeding the worker pool
//! - [`download`] - HTTP fetcher, worker pool engine and run statistics

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod download;
pub mod queue;
mod user_agent;

// Re-export commonly used types
pub use catalog::{Painting, ParseError, load_paintings};
pub use download::{
    DEFAULT_THREADS, DownloadError, DownloadStats, DownloadSummary, EngineError, FetchEngine,
    Fetcher, HttpClient, ItemOutcome,
};
pub use queue::{WorkItem, WorkQueue, upgrade_resolution};
