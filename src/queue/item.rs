//! Work item types and the URL resolution upgrade.

use std::path::{Path, PathBuf};

use crate::catalog::Painting;

/// Size token of the low-resolution IIIF rendition in published image URIs.
pub const LOW_RES_TOKEN: &str = "200,200";

/// Size token requested instead of [`LOW_RES_TOKEN`].
pub const HIGH_RES_TOKEN: &str = "1600,1600";

/// Extension of every downloaded image.
pub const IMAGE_EXTENSION: &str = "jpg";

/// One unit of download work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Object id; names the destination file.
    pub id: i64,
    /// Published image URI. Empty when the object has no published image.
    pub url: String,
    /// Title, for log context.
    pub title: String,
    /// Artist attribution, for log context.
    pub artist: String,
}

impl WorkItem {
    /// Creates a work item with no title or artist.
    #[must_use]
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: String::new(),
            artist: String::new(),
        }
    }

    /// Returns true if the item has a URL to fetch.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    /// Returns the destination filename, `<id>.jpg`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{IMAGE_EXTENSION}", self.id)
    }

    /// Returns `<images_dir>/<id>.jpg`.
    #[must_use]
    pub fn destination(&self, images_dir: &Path) -> PathBuf {
        images_dir.join(self.file_name())
    }
}

impl From<Painting> for WorkItem {
    fn from(painting: Painting) -> Self {
        Self {
            id: painting.id,
            url: painting.image_uri,
            title: painting.title,
            artist: painting.artist,
        }
    }
}

/// Requests the high-resolution rendition of a published image.
///
/// Replaces the first occurrence of `"200,200"` with `"1600,1600"` as a
/// literal substring; later occurrences are left alone.
#[must_use]
pub fn upgrade_resolution(url: &str) -> String {
    url.replacen(LOW_RES_TOKEN, HIGH_RES_TOKEN, 1)
}
