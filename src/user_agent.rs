//! User-Agent string for image requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/NationalGalleryOfArt/opendata";

/// Default User-Agent for download requests (identifies the tool).
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("painting-downloader/{version} (open-data-image-fetch; +{PROJECT_UA_URL})")
}
