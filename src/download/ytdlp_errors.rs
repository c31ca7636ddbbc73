//! Translation of yt-dlp output into [`DownloadError`]
//!
//! yt-dlp has no structured error surface on the command line, so its text
//! is matched here and nowhere else.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::download::error::DownloadError;

/// `File is larger than max-filesize (73400320 bytes > 51380224 bytes). Aborting.`
static MAX_FILESIZE_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"larger than max-filesize \((\d+) bytes > (\d+) bytes\)").ok());

/// Markers of content that needs an account the bot does not have.
const LOGIN_MARKERS: &[&str] = &[
    "login required",
    "requires login",
    "requires instagram login",
    "log in to",
    "login to",
    "sign in to view",
    "this account is private",
    "private account",
    "use --cookies",
];

/// Classifies combined yt-dlp stdout/stderr.
///
/// # Example
///
/// ```
/// use fetchbot::download::error::DownloadError;
/// use fetchbot::download::ytdlp_errors::classify;
///
/// let stderr = "ERROR: [Instagram] abc: Requested content is not available, rate-limit reached or login required.";
/// assert_eq!(classify(stderr), DownloadError::LoginRequired);
/// ```
pub fn classify(output: &str) -> DownloadError {
    let lower = output.to_lowercase();

    if LOGIN_MARKERS.iter().any(|m| lower.contains(m)) {
        return DownloadError::LoginRequired;
    }

    if let Some(size) = oversize_bytes(output) {
        return DownloadError::FileTooLarge(size);
    }

    DownloadError::Unknown(error_detail(output))
}

/// Observed size from a `--max-filesize` abort, if present.
pub fn oversize_bytes(output: &str) -> Option<u64> {
    MAX_FILESIZE_RE
        .as_ref()?
        .captures(output)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Last `ERROR:` line, or the last non-empty line.
fn error_detail(output: &str) -> String {
    let lines: Vec<&str> = output.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines
        .iter()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.trim_start_matches("ERROR:").trim().to_string())
        .unwrap_or_else(|| "no output from yt-dlp".to_string())
}
