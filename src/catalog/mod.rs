//! Painting catalog built from the NGA open data CSV files.
//!
//! Two tables are joined on the object id:
//!
//! - `data/objects.csv`: one row per object; only rows classified as
//!   `Painting` are kept.
//! - `data/published_images.csv`: one row per published image, carrying the
//!   IIIF URI of a low-resolution rendition.
//!
//! A painting without a published image keeps an empty `image_uri`.

mod error;

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, instrument};

pub use error::ParseError;

/// Path of the objects table relative to the open data checkout.
pub const OBJECTS_CSV: &str = "data/objects.csv";

/// Path of the published images table relative to the open data checkout.
pub const PUBLISHED_IMAGES_CSV: &str = "data/published_images.csv";

/// Classification value selecting paintings in the objects table.
pub const PAINTING_CLASSIFICATION: &str = "Painting";

/// Column indices (0-based).
mod columns {
    pub const OBJECT_ID: usize = 0;
    pub const TITLE: usize = 4;
    pub const ATTRIBUTION: usize = 14;
    pub const CLASSIFICATION: usize = 17;

    pub const IMAGE_URI: usize = 2;
    pub const IMAGE_OBJECT_ID: usize = 10;
}

/// A painting from the objects table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Painting {
    /// Object id shared by both tables.
    pub id: i64,
    /// Title of the work.
    pub title: String,
    /// Artist attribution.
    pub artist: String,
    /// Published image URI, empty when none was found.
    pub image_uri: String,
}

impl Painting {
    /// Returns true if a published image was joined onto this painting.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_uri.is_empty()
    }
}

/// Loads every painting under `opendata_dir` and attaches its image URI.
///
/// # Errors
///
/// Returns [`ParseError`] if either file is missing or malformed.
#[instrument(fields(opendata_dir = %opendata_dir.display()))]
pub fn load_paintings(opendata_dir: &Path) -> Result<Vec<Painting>, ParseError> {
    let mut paintings = find_paintings(&opendata_dir.join(OBJECTS_CSV))?;
    let matched = attach_image_uris(&mut paintings, &opendata_dir.join(PUBLISHED_IMAGES_CSV))?;

    let with_image = paintings.iter().filter(|p| p.has_image()).count();
    info!(
        paintings = paintings.len(),
        with_image,
        matched_rows = matched,
        "loaded painting catalog"
    );
    Ok(paintings)
}

/// Reads the objects table at `path`, keeping only paintings.
///
/// # Errors
///
/// Returns [`ParseError`] if the file cannot be opened or a row is malformed.
pub fn find_paintings(path: &Path) -> Result<Vec<Painting>, ParseError> {
    let file = File::open(path).map_err(|e| ParseError::open(path, e))?;
    read_paintings(file, path)
}

/// Reads an objects table from `reader`. `source` is used in error messages.
///
/// The first row is a header. Only rows classified as paintings have their
/// id parsed.
///
/// # Errors
///
/// Returns [`ParseError`] on malformed CSV, a short row, or a non-integer id.
pub fn read_paintings<R: io::Read>(reader: R, source: &Path) -> Result<Vec<Painting>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut paintings = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| ParseError::csv(source, e))?;
        if field(&record, columns::CLASSIFICATION, source)? != PAINTING_CLASSIFICATION {
            continue;
        }
        paintings.push(Painting {
            id: parse_id(&record, columns::OBJECT_ID, source)?,
            title: field(&record, columns::TITLE, source)?.to_string(),
            artist: field(&record, columns::ATTRIBUTION, source)?.to_string(),
            image_uri: String::new(),
        });
    }

    debug!(source = %source.display(), paintings = paintings.len(), "read objects table");
    Ok(paintings)
}

/// Joins the published images table at `path` onto `paintings`.
///
/// Returns the number of image rows that matched a painting.
///
/// # Errors
///
/// Returns [`ParseError`] if the file cannot be opened or a row is malformed.
pub fn attach_image_uris(paintings: &mut [Painting], path: &Path) -> Result<usize, ParseError> {
    let file = File::open(path).map_err(|e| ParseError::open(path, e))?;
    read_image_uris(paintings, file, path)
}

/// Joins a published images table read from `reader` onto `paintings`.
///
/// Every row's id is parsed. When several rows share an id, the last one
/// wins. Rows for objects that are not in `paintings` are ignored.
///
/// # Errors
///
/// Returns [`ParseError`] on malformed CSV, a short row, or a non-integer id.
pub fn read_image_uris<R: io::Read>(
    paintings: &mut [Painting],
    reader: R,
    source: &Path,
) -> Result<usize, ParseError> {
    let index: HashMap<i64, usize> = paintings
        .iter()
        .enumerate()
        .map(|(position, painting)| (painting.id, position))
        .collect();

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut matched = 0usize;
    for record in csv_reader.records() {
        let record = record.map_err(|e| ParseError::csv(source, e))?;
        let id = parse_id(&record, columns::IMAGE_OBJECT_ID, source)?;
        if let Some(&position) = index.get(&id) {
            paintings[position].image_uri = field(&record, columns::IMAGE_URI, source)?.to_string();
            matched += 1;
        }
    }

    debug!(source = %source.display(), matched, "read published images table");
    Ok(matched)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn field<'r>(record: &'r StringRecord, column: usize, source: &Path) -> Result<&'r str, ParseError> {
    record.get(column).ok_or_else(|| ParseError::MissingColumn {
        path: source.to_path_buf(),
        line: record_line(record),
        column,
        found: record.len(),
    })
}

fn parse_id(record: &StringRecord, column: usize, source: &Path) -> Result<i64, ParseError> {
    let value = field(record, column, source)?;
    value.parse().map_err(|_| ParseError::InvalidId {
        path: source.to_path_buf(),
        line: record_line(record),
        value: value.to_string(),
    })
}
