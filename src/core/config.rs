//! Configuration constants for the bot

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server URL (local telegram-bot-api), if any
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok().filter(|v| !v.is_empty()));

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// ffprobe binary path, used to read video dimensions before sending
pub static FFPROBE_BIN: Lazy<String> =
    Lazy::new(|| env::var("FFPROBE_BIN").unwrap_or_else(|_| "ffprobe".to_string()));

/// Directory where fetched files live until they are sent.
/// Read from TEMP_FILES_DIR, defaults to ./temp. Supports tilde (~) expansion.
pub static TEMP_FILES_DIR: Lazy<String> = Lazy::new(|| {
    let raw = env::var("TEMP_FILES_DIR").unwrap_or_else(|_| "temp".to_string());
    shellexpand::tilde(&raw).to_string()
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Default size ceiling in megabytes (Telegram bot upload limit is 50 MB, keep a margin)
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 49;

/// Maximum artifact size accepted for delivery, in bytes.
/// Shared by every platform strategy and the worker's own check.
/// Read from MAX_FILE_SIZE_MB, defaults to 49 MiB.
pub static MAX_FILE_SIZE_BYTES: Lazy<u64> =
    Lazy::new(|| parse_size_limit_mb(env::var("MAX_FILE_SIZE_MB").ok().as_deref()));

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Parses a megabyte value into bytes, falling back to the default on
/// missing, empty, zero, malformed or out-of-range input.
pub fn parse_size_limit_mb(raw: Option<&str>) -> u64 {
    raw.map(str::trim)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .and_then(|mb| mb.checked_mul(BYTES_PER_MB))
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                log::warn!(
                    "Ignoring invalid MAX_FILE_SIZE_MB={:?}, using {} MB",
                    value,
                    DEFAULT_MAX_FILE_SIZE_MB
                );
            }
            DEFAULT_MAX_FILE_SIZE_MB * BYTES_PER_MB
        })
}

/// Worker loop configuration
pub mod worker {
    use super::Duration;

    /// Pause after an unexpected failure in the worker loop (in seconds)
    pub const ERROR_BACKOFF_SECS: u64 = 5;

    /// How long an in-flight job may keep running after shutdown is requested (in seconds)
    pub const SHUTDOWN_GRACE_SECS: u64 = 5;

    /// Error backoff duration
    pub fn error_backoff() -> Duration {
        Duration::from_secs(ERROR_BACKOFF_SECS)
    }

    /// Shutdown grace duration
    pub fn shutdown_grace() -> Duration {
        Duration::from_secs(SHUTDOWN_GRACE_SECS)
    }
}

/// Download configuration
pub mod download {
    use super::Duration;

    /// Timeout for yt-dlp commands (in seconds)
    pub const YTDLP_TIMEOUT_SECS: u64 = 240;

    /// Timeout for ffprobe metadata queries (in seconds)
    pub const FFPROBE_TIMEOUT_SECS: u64 = 30;

    /// Codec used when extracting audio
    pub const AUDIO_CODEC: &str = "mp3";

    /// Quality passed to yt-dlp --audio-quality
    pub const AUDIO_QUALITY: &str = "128K";

    /// Room left for the audio track when picking a size-capped video format
    pub const AUDIO_ALLOWANCE_BYTES: u64 = 6 * 1024 * 1024;

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }

    /// ffprobe command timeout duration
    pub fn ffprobe_timeout() -> Duration {
        Duration::from_secs(FFPROBE_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API requests (in seconds)
    /// Large enough for a ~50 MB upload over a slow link
    pub const REQUEST_TIMEOUT_SECS: u64 = 300;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
