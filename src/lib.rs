//! Fetchbot - Telegram bot for downloading video and audio
//!
//! Users send a YouTube, Twitter or Instagram link; the bot queues a job and a
//! single background worker fetches the media and sends it back.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, user texts and link validation
//! - `download`: Job queue, fetch strategies, temp-file guard and the worker
//! - `telegram`: Bot construction, Telegram delivery and request handlers
//! - `cli`: Command-line interface

pub mod cli;
pub mod core;
pub mod download;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{config, AppError};
pub use download::{Job, JobQueue, Worker};
