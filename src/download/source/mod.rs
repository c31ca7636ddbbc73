//! Per-platform fetch strategies.
//!
//! Provides the `MediaSource` trait, one implementation per supported
//! platform. Every strategy runs the shared [`MediaFetcher`] with its own
//! extraction options and enforces the size ceiling before returning, so a
//! caller never sees an oversized file.
//!
//! Built-in strategies:
//! - `YouTubeSource`: size-capped MP4 format chain, merged audio
//! - `TwitterSource`: single-file MP4
//! - `InstagramSource`: single-file MP4, login walls reported as such

pub mod instagram;
pub mod twitter;
pub mod youtube;

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use crate::download::error::DownloadError;
use crate::download::fetcher::{ExtractOptions, ExtractRequest, MediaFetcher};
use crate::download::guard::{sweep_partials, TempFileGuard};
use crate::download::job::{MediaKind, Platform};

pub use instagram::InstagramSource;
pub use twitter::TwitterSource;
pub use youtube::YouTubeSource;

/// A fetched file and its display title.
///
/// The guard owns the file from the moment the fetch returns.
#[derive(Debug)]
pub struct DownloadResult {
    pub file: TempFileGuard,
    pub title: String,
}

/// Fetch capability of one platform.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Platform served by this strategy.
    fn platform(&self) -> Platform;

    async fn fetch_video(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError>;

    async fn fetch_audio(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError>;

    /// Dispatches on the requested kind.
    async fn fetch(&self, kind: MediaKind, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        match kind {
            MediaKind::Video => self.fetch_video(url, request_id).await,
            MediaKind::Audio => self.fetch_audio(url, request_id).await,
        }
    }
}

/// Checks that the fetched file exists and fits under `limit` bytes.
///
/// An oversized file is deleted before the error is returned.
pub async fn enforce_size_limit(result: DownloadResult, limit: u64) -> Result<DownloadResult, DownloadError> {
    let path = result.file.path().to_path_buf();
    let size = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => return Err(DownloadError::FileNotFound(path)),
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(DownloadError::FileNotFound(path)),
        Err(e) => return Err(DownloadError::Unknown(format!("cannot stat {}: {}", path.display(), e))),
    };

    if size > limit {
        log::warn!(
            "File {} is {} bytes, over the {} byte limit, deleting",
            path.display(),
            size,
            limit
        );
        result.file.release().await;
        return Err(DownloadError::FileTooLarge(size));
    }
    Ok(result)
}

/// State shared by every built-in strategy.
#[derive(Clone)]
pub struct SourceContext {
    pub fetcher: Arc<dyn MediaFetcher>,
    pub size_limit: u64,
    pub output_dir: PathBuf,
}

impl SourceContext {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, size_limit: u64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            size_limit,
            output_dir: output_dir.into(),
        }
    }

    /// Runs one extraction and applies the size ceiling.
    ///
    /// On failure, intermediate files left under the request id are removed.
    pub async fn fetch_with(
        &self,
        kind: MediaKind,
        url: &str,
        request_id: &str,
        options: ExtractOptions,
        fallback_title: &str,
    ) -> Result<DownloadResult, DownloadError> {
        let request = ExtractRequest {
            url: url.to_string(),
            kind,
            request_id: request_id.to_string(),
            output_dir: self.output_dir.clone(),
            max_filesize: Some(self.size_limit),
            options,
        };

        let extracted = match self.fetcher.extract(&request).await {
            Ok(extracted) => extracted,
            Err(e) => {
                sweep_partials(&self.output_dir, request_id).await;
                return Err(e);
            }
        };

        let result = DownloadResult {
            file: TempFileGuard::new(extracted.path),
            title: extracted
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| fallback_title.to_string()),
        };
        enforce_size_limit(result, self.size_limit).await
    }
}

/// Options shared by all platforms for audio requests.
pub fn audio_options() -> ExtractOptions {
    ExtractOptions {
        format: "bestaudio/best".to_string(),
        extract_audio: true,
        ..Default::default()
    }
}
