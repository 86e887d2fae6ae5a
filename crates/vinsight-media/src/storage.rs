//! Local storage layout for ingested videos.
//!
//! Everything lands in a single flat downloads directory. Filenames
//! are sanitized down to their base name with spaces replaced by
//! underscores; there is no collision handling beyond Drive-sourced
//! files embedding the remote file id in their name.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::MediaResult;

/// Default downloads directory, relative to the working directory.
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";

/// Chunk size for writing uploaded bytes to disk (1 MiB).
const UPLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Sanitize a user-supplied filename: base name only, spaces to
/// underscores.
pub fn sanitize_filename(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    base.replace(' ', "_")
}

/// Resolve the local path for a (sanitized) filename, creating the
/// downloads directory if needed.
pub async fn local_download_path(downloads_dir: &Path, filename: &str) -> MediaResult<PathBuf> {
    tokio::fs::create_dir_all(downloads_dir).await?;
    Ok(downloads_dir.join(sanitize_filename(filename)))
}

/// Write uploaded bytes to the downloads directory in fixed-size
/// chunks.
///
/// Returns the path the file was written to.
pub async fn save_upload(
    downloads_dir: &Path,
    filename: &str,
    data: &[u8],
) -> MediaResult<PathBuf> {
    let path = local_download_path(downloads_dir, filename).await?;

    let mut file = tokio::fs::File::create(&path).await?;
    for chunk in data.chunks(UPLOAD_CHUNK_SIZE) {
        file.write_all(chunk).await?;
    }
    file.flush().await?;

    info!(
        path = %path.display(),
        size_mb = data.len() as f64 / (1024.0 * 1024.0),
        "Saved uploaded video"
    );
    debug!(chunks = data.len().div_ceil(UPLOAD_CHUNK_SIZE), "Chunked write complete");

    Ok(path)
}
