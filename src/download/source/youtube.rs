//! YouTubeSource: size-capped MP4 downloads

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config;
use crate::download::error::DownloadError;
use crate::download::fetcher::{ExtractOptions, MediaFetcher};
use crate::download::job::{MediaKind, Platform};
use crate::download::source::{audio_options, DownloadResult, MediaSource, SourceContext};

const FALLBACK_TITLE: &str = "Untitled";

/// Heights tried in order, best first.
const HEIGHTS: [u32; 4] = [1080, 720, 480, 360];

pub struct YouTubeSource {
    ctx: SourceContext,
}

impl YouTubeSource {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, size_limit: u64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx: SourceContext::new(fetcher, size_limit, output_dir),
        }
    }

    fn video_options(&self) -> ExtractOptions {
        ExtractOptions {
            format: build_size_capped_format(self.ctx.size_limit),
            merge_output_format: Some("mp4".to_string()),
            ..Default::default()
        }
    }
}

/// Builds a yt-dlp format selector that stays under `size_limit`.
///
/// For each height, the best MP4 video stream that leaves room for the audio
/// track is merged with the best m4a audio. After that, any single-file MP4
/// that fits. `filesize<?` also accepts formats with unknown size; those are
/// caught by `--max-filesize` and the post-download check.
pub fn build_size_capped_format(size_limit: u64) -> String {
    let video_cap = size_limit.saturating_sub(config::download::AUDIO_ALLOWANCE_BYTES);

    let mut parts: Vec<String> = HEIGHTS
        .iter()
        .map(|h| format!("bv*[ext=mp4][height<={h}][filesize<?{video_cap}]+ba[ext=m4a]"))
        .collect();
    parts.push(format!("b[ext=mp4][filesize<?{size_limit}]"));

    parts.join("/")
}

#[async_trait]
impl MediaSource for YouTubeSource {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    async fn fetch_video(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        self.ctx
            .fetch_with(MediaKind::Video, url, request_id, self.video_options(), FALLBACK_TITLE)
            .await
    }

    async fn fetch_audio(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        self.ctx
            .fetch_with(MediaKind::Audio, url, request_id, audio_options(), FALLBACK_TITLE)
            .await
    }
}
