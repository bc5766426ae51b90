//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use painting_core::DEFAULT_THREADS;

/// Default output directory for downloaded images.
pub const DEFAULT_IMAGES_DIR: &str = "data/downloaded";

/// Default location of the NGA open data checkout.
pub const DEFAULT_OPENDATA_DIR: &str = "../opendata";

/// Bulk download painting images from the National Gallery of Art open data.
///
/// Reads `data/objects.csv` and `data/published_images.csv` from the open
/// data checkout, then fetches a 1600px rendition of every painting into
/// `<images-dir>/<id>.jpg`, skipping files that already exist.
#[derive(Parser, Debug)]
#[command(name = "painting-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Images output directory (created if missing)
    #[arg(long, alias = "images_dir", default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: PathBuf,

    /// Number of download workers (1-256; each worker holds one open connection)
    #[arg(short = 't', long, default_value_t = DEFAULT_THREADS as u16, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub threads: u16,

    /// Path to the https://github.com/NationalGalleryOfArt/opendata base dir
    #[arg(long, alias = "opendata_dir", default_value = DEFAULT_OPENDATA_DIR)]
    pub opendata_dir: PathBuf,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
