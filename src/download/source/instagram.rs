//! InstagramSource: public reels and posts.
//!
//! Private accounts and rate-limited requests surface from yt-dlp as login
//! walls and come back as [`DownloadError::LoginRequired`].

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::download::error::DownloadError;
use crate::download::fetcher::{ExtractOptions, MediaFetcher};
use crate::download::job::{MediaKind, Platform};
use crate::download::source::{audio_options, DownloadResult, MediaSource, SourceContext};

const FALLBACK_TITLE: &str = "Instagram Reel";

pub struct InstagramSource {
    ctx: SourceContext,
}

impl InstagramSource {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, size_limit: u64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx: SourceContext::new(fetcher, size_limit, output_dir),
        }
    }

    fn quiet(mut options: ExtractOptions) -> ExtractOptions {
        options.extra_args.push("--no-warnings".to_string());
        options
    }
}

#[async_trait]
impl MediaSource for InstagramSource {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn fetch_video(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        let options = Self::quiet(ExtractOptions {
            format: "best[ext=mp4]".to_string(),
            ..Default::default()
        });
        self.ctx
            .fetch_with(MediaKind::Video, url, request_id, options, FALLBACK_TITLE)
            .await
    }

    async fn fetch_audio(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        self.ctx
            .fetch_with(MediaKind::Audio, url, request_id, Self::quiet(audio_options()), FALLBACK_TITLE)
            .await
    }
}
