//! Process execution utilities with timeout support
//!
//! Provides helpers for running external processes (yt-dlp, ffprobe)
//! with configurable timeouts so a hung process cannot stall the worker.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::core::error::AppError;

/// Run an async Command with a timeout.
///
/// The child is spawned with `kill_on_drop`, so both a timeout and a caller
/// that stops polling (an abandoned job) take the process down with them.
///
/// Returns the process Output on success, or an AppError on timeout/IO failure.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, AppError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(AppError::Io(e)),
        Err(_) => Err(AppError::Timeout(timeout.as_secs())),
    }
}
