//! Output directory handling and the existence check behind skip logic.

use std::path::Path;

use tracing::debug;

/// Creates `dir` and every missing parent. Succeeds if it already exists.
///
/// # Errors
///
/// Returns the underlying IO error if a component cannot be created, or if
/// `dir` exists but is not a directory.
pub async fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    debug!(dir = %dir.display(), "output directory ready");
    Ok(())
}

/// Returns true iff a regular file already exists at `path`.
///
/// Metadata errors (missing file, permission denied) count as "absent"; a
/// subsequent fetch surfaces any real filesystem problem as an IO error.
pub async fn destination_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}
