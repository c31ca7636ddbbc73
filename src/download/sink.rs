//! Delivery seam between the worker and the chat transport

use async_trait::async_trait;
use std::path::PathBuf;
use teloxide::types::ChatId;
use thiserror::Error;

use crate::download::job::{MediaKind, Platform};

/// A finished file ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: MediaKind,
    pub path: PathBuf,
    pub title: String,
    pub platform: Platform,
}

/// Failure to hand something to the chat transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// The artifact could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport refused the payload
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Destination for finished artifacts and error notices.
///
/// Implementations are never retried by the worker: a failed delivery ends
/// the job.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Sends a fetched file to the chat.
    async fn send_artifact(&self, chat_id: ChatId, artifact: &Artifact, request_id: &str) -> Result<(), DeliveryError>;

    /// Sends a plain text notice to the chat.
    async fn send_text(&self, chat_id: ChatId, text: &str, request_id: &str) -> Result<(), DeliveryError>;
}
