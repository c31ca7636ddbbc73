//! Media extraction backend
//!
//! [`MediaFetcher`] is the seam between platform strategies and the tool
//! that actually pulls bytes off the network. The production implementation
//! shells out to yt-dlp; tests plug in fakes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::AppError;
use crate::core::process::run_with_timeout;
use crate::download::error::DownloadError;
use crate::download::job::MediaKind;
use crate::download::ytdlp_errors::classify;

/// Per-platform extraction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// yt-dlp format selector
    pub format: String,
    /// Container for merged video+audio downloads
    pub merge_output_format: Option<String>,
    /// Extract audio and convert it to the configured codec
    pub extract_audio: bool,
    /// Additional raw arguments
    pub extra_args: Vec<String>,
}

/// Everything a fetcher needs for one extraction.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub url: String,
    pub kind: MediaKind,
    pub request_id: String,
    pub output_dir: PathBuf,
    /// Abort when the selected format is known to exceed this many bytes
    pub max_filesize: Option<u64>,
    pub options: ExtractOptions,
}

/// File produced by a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub path: PathBuf,
    pub title: Option<String>,
}

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Runs one extraction and reports the produced file.
    async fn extract(&self, request: &ExtractRequest) -> Result<Extracted, DownloadError>;
}

const TITLE_PREFIX: &str = "TITLE:";
const SIZE_PREFIX: &str = "SIZE:";
const FILE_PREFIX: &str = "FILE:";

/// Fields yt-dlp reported through the `--print` directives.
///
/// `--print` implies `--quiet`, so these lines are the only stdout output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Printed {
    pub title: Option<String>,
    /// Exact or approximate size of the selected format, in bytes
    pub size: Option<u64>,
    /// Final file, printed only when a download actually happened
    pub path: Option<PathBuf>,
}

impl Printed {
    /// Reported size, if it is over `limit`.
    pub fn oversize(&self, limit: Option<u64>) -> Option<u64> {
        match (self.size, limit) {
            (Some(size), Some(limit)) if size > limit => Some(size),
            _ => None,
        }
    }
}

fn printed_value(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty() && raw != "NA").then_some(raw)
}

fn parse_size(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

/// [`MediaFetcher`] backed by the yt-dlp binary.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    bin: String,
    timeout: Duration,
}

impl YtDlpFetcher {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    /// Uses `YTDL_BIN` and the configured yt-dlp timeout.
    pub fn from_config() -> Self {
        Self::new(config::YTDL_BIN.as_str(), config::download::ytdlp_timeout())
    }

    /// Output template: every file of a request starts with its id.
    pub fn output_template(output_dir: &Path, request_id: &str) -> String {
        output_dir
            .join(format!("{}.%(ext)s", request_id))
            .to_string_lossy()
            .to_string()
    }

    /// Builds the yt-dlp argument list for a request.
    pub fn build_args(request: &ExtractRequest) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--no-playlist".into(),
            "--no-progress".into(),
            "--no-simulate".into(),
            "--restrict-filenames".into(),
            "-o".into(),
            Self::output_template(&request.output_dir, &request.request_id),
            "--print".into(),
            format!("{}%(title)s", TITLE_PREFIX),
            "--print".into(),
            format!("before_dl:{}%(filesize,filesize_approx)s", SIZE_PREFIX),
            "--print".into(),
            format!("after_move:{}%(filepath)s", FILE_PREFIX),
        ];

        if !request.options.format.is_empty() {
            args.push("-f".into());
            args.push(request.options.format.clone());
        }
        if let Some(container) = &request.options.merge_output_format {
            args.push("--merge-output-format".into());
            args.push(container.clone());
        }
        if request.options.extract_audio {
            args.extend([
                "-x".to_string(),
                "--audio-format".to_string(),
                config::download::AUDIO_CODEC.to_string(),
                "--audio-quality".to_string(),
                config::download::AUDIO_QUALITY.to_string(),
            ]);
        }
        if let Some(limit) = request.max_filesize {
            args.push("--max-filesize".into());
            args.push(limit.to_string());
        }
        args.extend(request.options.extra_args.iter().cloned());
        args.push(request.url.clone());
        args
    }

    /// Pulls title, size and final path out of the `--print` lines.
    pub fn parse_printed(stdout: &str) -> Printed {
        let mut printed = Printed::default();
        for line in stdout.lines() {
            if let Some(t) = line.strip_prefix(TITLE_PREFIX).and_then(printed_value) {
                printed.title = Some(t.to_string());
            } else if let Some(s) = line.strip_prefix(SIZE_PREFIX).and_then(printed_value) {
                printed.size = parse_size(s).or(printed.size);
            } else if let Some(p) = line.strip_prefix(FILE_PREFIX).and_then(printed_value) {
                printed.path = Some(PathBuf::from(p));
            }
        }
        printed
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::from_config()
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn extract(&self, request: &ExtractRequest) -> Result<Extracted, DownloadError> {
        let args = Self::build_args(request);
        log::info!(
            "[{}] Running {} for {} ({})",
            request.request_id,
            self.bin,
            request.url,
            request.kind
        );
        log::debug!("[{}] {} {}", request.request_id, self.bin, args.join(" "));

        let mut cmd = Command::new(&self.bin);
        cmd.args(&args);
        let output = run_with_timeout(&mut cmd, self.timeout).await.map_err(|e| match e {
            AppError::Timeout(secs) => DownloadError::Unknown(format!("yt-dlp timed out after {}s", secs)),
            other => DownloadError::Unknown(format!("failed to run {}: {}", self.bin, other)),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}\n{}", stdout, stderr);

        let printed = Self::parse_printed(&stdout);
        let oversize = printed.oversize(request.max_filesize);

        if !output.status.success() {
            // the downloader aborts oversized streams whose size was unknown up front
            let err = match (classify(&combined), oversize) {
                (DownloadError::Unknown(_), Some(size)) => DownloadError::FileTooLarge(size),
                (err, _) => err,
            };
            log::warn!(
                "[{}] yt-dlp exited with {}: {}",
                request.request_id,
                output.status,
                err
            );
            return Err(err);
        }

        if let Some(path) = printed.path {
            return Ok(Extracted {
                path,
                title: printed.title,
            });
        }

        // yt-dlp exits 0 without a file when --max-filesize skips the download
        if let Some(size) = oversize {
            log::warn!(
                "[{}] yt-dlp skipped {}: {} bytes over the {:?} byte limit",
                request.request_id,
                request.url,
                size,
                request.max_filesize
            );
            return Err(DownloadError::FileTooLarge(size));
        }
        match classify(&combined) {
            err @ DownloadError::FileTooLarge(_) => Err(err),
            _ => Err(DownloadError::FileNotFound(PathBuf::from(Self::output_template(
                &request.output_dir,
                &request.request_id,
            )))),
        }
    }
}
