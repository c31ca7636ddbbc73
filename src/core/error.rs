use thiserror::Error;

use crate::core::validation::ValidationError;
use crate::download::error::DownloadError;
use crate::download::sink::DeliveryError;

/// Centralized error types for the application
///
/// Errors that are not tied to a single job (bot start-up, IO on the temp
/// directory, a panicking strategy) end up here. Uses `thiserror` for
/// automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use fetchbot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Classified download failures
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Result delivery failures
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// External process ran past its timeout
    #[error("Process timed out after {0}s")]
    Timeout(u64),

    /// Defects: panics and other failures nobody classified
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
