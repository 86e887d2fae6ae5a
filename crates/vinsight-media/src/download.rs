//! Google Drive video download.
//!
//! Sharing links of the form `.../d/<file_id>/...` are resolved to the
//! direct-download endpoint and fetched with a plain GET. Large files
//! behind Drive's interstitial virus-scan confirmation page are not
//! handled; the fetch then stores the HTML page instead of the video,
//! which is a known limitation carried over from the original flow.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::error::{MediaError, MediaResult};
use crate::storage::local_download_path;

/// Extract the file id from a Drive sharing URL.
///
/// The id is the path segment after `/d/`.
pub fn drive_file_id(drive_url: &str) -> MediaResult<String> {
    let parsed = Url::parse(drive_url).map_err(|_| MediaError::invalid_drive_url(drive_url))?;

    let id = parsed
        .path_segments()
        .and_then(|segments| {
            let mut segments = segments.skip_while(|s| *s != "d");
            segments.nth(1)
        })
        .unwrap_or("");

    if id.is_empty() {
        return Err(MediaError::invalid_drive_url(drive_url));
    }
    Ok(id.to_string())
}

/// Direct-download URL for a Drive file id.
pub fn drive_direct_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}

/// Download a Drive-shared video into the downloads directory.
///
/// The file lands at `downloads/video_<file_id>.mp4`. Returns the
/// local path on success.
pub async fn download_drive_file(drive_url: &str, downloads_dir: &Path) -> MediaResult<PathBuf> {
    let file_id = drive_file_id(drive_url)?;
    let direct_url = drive_direct_url(&file_id);
    let dest = local_download_path(downloads_dir, &format!("video_{file_id}.mp4")).await?;

    info!(file_id, dest = %dest.display(), "Downloading video from Google Drive");
    fetch_to_file(&direct_url, &dest).await?;
    Ok(dest)
}

/// GET a URL and stream the body to a local file.
///
/// Non-success statuses fail without writing anything.
pub async fn fetch_to_file(url: &str, dest: &Path) -> MediaResult<()> {
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "server returned {}",
            response.status()
        )));
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        written += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    debug!(url, bytes = written, "Download complete");
    Ok(())
}
