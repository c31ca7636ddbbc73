//! User-facing texts
//!
//! Every string the bot shows to a user lives here, so wording changes never
//! touch handler or worker code.

pub const VIDEO_BUTTON_TEXT: &str = "Video 🎬";
pub const AUDIO_BUTTON_TEXT: &str = "Audio 🎵";
pub const CANCEL_BUTTON_TEXT: &str = "Cancel 🚫";

pub const HELP_MESSAGE: &str = "Hi! I can download video or audio from YouTube, Twitter and Instagram.\n\n\
    Press a button below and then send me a link.\n\
    For example: https://www.youtube.com/watch?v=dQw4w9WgXcQ\n\n\
    Telegram limits bot uploads to about 49MB, so I pick the best quality that fits.";

pub const QUEUE_MESSAGE: &str = "⏳ Downloading, please wait";
pub const WAIT_FOR_LINK: &str = "🔗 Send the link to the chat";
pub const ACTION_CANCEL: &str = "☝️ Action cancelled";
pub const ACTION_EMPTY: &str = "👇 Nothing to cancel";
pub const USE_BUTTONS_WARN: &str = "⚠️ Please use the buttons.";
pub const UNKNOWN_COMMAND_MESSAGE: &str = "🤡 Unknown command or wrong format. Try /help to see what I can do.";

pub const INVALID_URL_MESSAGE: &str = "☹️ Error: please send a valid link or press \"Cancel 🚫\".";
pub const UNSUPPORTED_DOMAIN_MESSAGE: &str =
    "☹️ Error: only Twitter, YouTube and Instagram Reels links are supported.";

pub const DOWNLOAD_ERROR_MESSAGE: &str =
    "☹️ Error: couldn't download the file. Try another link or retry later.";
pub const TECHNICAL_ERROR_MESSAGE: &str = "☹️ Error: a technical problem occurred. Please try again later.";
pub const UNAVAILABLE_REELS: &str =
    "☹️ Can't download this Instagram video. It may be private or require login.";

/// "File too large" text with the observed size embedded.
pub fn file_too_large(size_bytes: u64) -> String {
    format!(
        "☹️ Error: the file is too large ({}) to send via Telegram.",
        format_size_mb(size_bytes)
    )
}

/// "Platform not supported" text for a platform tag.
pub fn platform_not_supported(platform: &str) -> String {
    let platform = if platform.trim().is_empty() { "Unknown" } else { platform };
    format!("☹️ Downloading from {} is not supported yet.", platform)
}

/// Formats a byte count as megabytes with one decimal, e.g. `52.4MB`.
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.1}MB", size_bytes as f64 / (1024.0 * 1024.0))
}
