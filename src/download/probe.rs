//! Video stream metadata via ffprobe
//!
//! Telegram renders a video with the wrong aspect ratio unless width and
//! height are passed along with the upload.

use std::path::Path;
use tokio::process::Command;

use crate::core::config;
use crate::core::process::run_with_timeout;

/// Dimensions and duration of the first video stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration_secs: Option<u32>,
}

/// Probes a video file. Returns `None` if ffprobe is unavailable or fails.
pub async fn probe_video_metadata(path: &Path, request_id: &str) -> Option<VideoMetadata> {
    let mut cmd = Command::new(config::FFPROBE_BIN.as_str());
    cmd.args([
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream=width,height:format=duration",
        "-of",
        "default=noprint_wrappers=1",
    ])
    .arg(path);

    let output = match run_with_timeout(&mut cmd, config::download::ffprobe_timeout()).await {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            log::warn!(
                "[{}] ffprobe failed for {}: {}",
                request_id,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }
        Err(e) => {
            log::warn!("[{}] ffprobe unavailable for {}: {}", request_id, path.display(), e);
            return None;
        }
    };

    Some(parse_ffprobe_output(&String::from_utf8_lossy(&output.stdout)))
}

/// Parses `key=value` lines printed by ffprobe.
pub fn parse_ffprobe_output(stdout: &str) -> VideoMetadata {
    let mut meta = VideoMetadata::default();
    for line in stdout.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key {
            "width" => meta.width = value.parse().ok().filter(|w| *w > 0),
            "height" => meta.height = value.parse().ok().filter(|h| *h > 0),
            "duration" => {
                meta.duration_secs = value
                    .parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite() && *d >= 0.0)
                    .map(|d| d.round() as u32)
            }
            _ => {}
        }
    }
    meta
}
