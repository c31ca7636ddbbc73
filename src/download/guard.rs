//! Scoped ownership of fetched temp files
//!
//! A [`TempFileGuard`] is created the moment a fetch produces a file and is
//! carried by value through size check and delivery. Whatever path the job
//! takes afterwards, the file is removed: explicitly via
//! [`TempFileGuard::release`] on the normal path, or by `Drop` when the job
//! errors out, panics or is abandoned at shutdown.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Owns a temp file and deletes it when done.
#[derive(Debug)]
pub struct TempFileGuard {
    path: Option<PathBuf>,
}

impl TempFileGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Path of the guarded file.
    pub fn path(&self) -> &Path {
        // `path` is only `None` after `release`/`persist`, both of which consume `self`.
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Deletes the file without blocking the runtime.
    ///
    /// A file that is already gone is fine; other failures are logged.
    pub async fn release(mut self) {
        if let Some(path) = self.path.take() {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => log::debug!("Removed temp file {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => log::warn!("Failed to remove temp file {}: {}", path.display(), e),
            }
        }
    }

    /// Stops guarding and hands the path to the caller, who now owns the file.
    pub fn persist(mut self) -> PathBuf {
        self.path.take().unwrap_or_default()
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            match std::fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed temp file {} on drop", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => log::warn!("Failed to remove temp file {}: {}", path.display(), e),
            }
        }
    }
}

/// Removes leftovers of an interrupted fetch.
///
/// yt-dlp names every intermediate file (`.part`, `.ytdl`, fragments,
/// pre-merge streams) after the output template, which starts with the
/// request id. Returns how many files were removed.
pub async fn sweep_partials(dir: &Path, request_id: &str) -> usize {
    if request_id.is_empty() {
        return 0;
    }

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("[{}] Cannot scan {} for partial files: {}", request_id, dir.display(), e);
            }
            return 0;
        }
    };

    let mut removed = 0;
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                log::warn!("[{}] Error while scanning {}: {}", request_id, dir.display(), e);
                break;
            }
        };
        if !entry.file_name().to_string_lossy().starts_with(request_id) {
            continue;
        }
        let path = entry.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                removed += 1;
                log::info!("[{}] Removed partial file {}", request_id, path.display());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!("[{}] Failed to remove partial file {}: {}", request_id, path.display(), e),
        }
    }
    removed
}
