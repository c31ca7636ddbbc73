use std::path::PathBuf;
use thiserror::Error;

use crate::core::error::AppError;
use crate::core::messages;
use crate::download::job::Platform;
use crate::download::sink::DeliveryError;

/// Classified failure of a fetch strategy.
///
/// This is the closed set the worker maps onto user-facing texts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DownloadError {
    /// Artifact exceeds the configured size ceiling (observed size in bytes)
    #[error("File is too large: {}", messages::format_size_mb(*.0))]
    FileTooLarge(u64),
    /// The source requires authentication the bot does not hold
    #[error("Content requires login")]
    LoginRequired,
    /// Extraction reported success but the output file is missing
    #[error("File not found after download: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Any other extraction failure
    #[error("Download failed: {0}")]
    Unknown(String),
}

impl DownloadError {
    /// Short label for log lines
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::FileTooLarge(_) => "file_too_large",
            DownloadError::LoginRequired => "login_required",
            DownloadError::FileNotFound(_) => "file_not_found",
            DownloadError::Unknown(_) => "unknown",
        }
    }
}

/// Outcome of one job that did not end in a delivered artifact.
#[derive(Debug, Error)]
pub enum JobError {
    /// No strategy registered for the job's platform tag
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(String),

    /// Strategy failed with a classified error
    #[error("{platform} download failed: {error}")]
    Download { platform: Platform, error: DownloadError },

    /// The sink rejected the artifact
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// A defect: panic or unclassified failure inside job processing
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

impl JobError {
    /// Whether the outer loop should pause before taking the next job.
    pub fn needs_backoff(&self) -> bool {
        matches!(self, JobError::Internal(_))
    }
}

/// Translates a job failure into the single text sent to the user.
///
/// Pure: no logging, no IO.
pub fn user_message(err: &JobError) -> String {
    match err {
        JobError::UnsupportedPlatform(tag) => messages::platform_not_supported(tag),
        JobError::Download { platform, error } => match error {
            DownloadError::FileTooLarge(size) => messages::file_too_large(*size),
            DownloadError::LoginRequired if *platform == Platform::Instagram => messages::UNAVAILABLE_REELS.to_string(),
            DownloadError::LoginRequired => messages::DOWNLOAD_ERROR_MESSAGE.to_string(),
            DownloadError::FileNotFound(_) | DownloadError::Unknown(_) => messages::TECHNICAL_ERROR_MESSAGE.to_string(),
        },
        JobError::Delivery(_) | JobError::Internal(_) => messages::TECHNICAL_ERROR_MESSAGE.to_string(),
    }
}
