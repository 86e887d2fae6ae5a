//! Local media intake for the Video Insight backend.
//!
//! Handles the two input sources: directly-uploaded video files and
//! Google Drive sharing links, both landing in a flat downloads
//! directory.

pub mod download;
pub mod error;
pub mod storage;

pub use download::{download_drive_file, drive_direct_url, drive_file_id, fetch_to_file};
pub use error::{MediaError, MediaResult};
pub use storage::{local_download_path, sanitize_filename, save_upload, DEFAULT_DOWNLOADS_DIR};
