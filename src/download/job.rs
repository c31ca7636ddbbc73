//! Job record handed from the request side to the worker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use teloxide::types::ChatId;

/// What the user asked to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

/// Platforms with a fetch strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    YouTube,
    Twitter,
    Instagram,
}

/// One user request to fetch and deliver a media file.
///
/// Immutable after creation. The platform is stored as the tag supplied by
/// the producer; the worker resolves it at dispatch time and rejects tags it
/// has no strategy for.
///
/// # Example
///
/// ```no_run
/// use teloxide::types::ChatId;
/// use fetchbot::download::job::{Job, MediaKind, Platform};
///
/// let job = Job::new(ChatId(123456789), "https://youtu.be/dQw4w9WgXcQ", MediaKind::Video, Platform::YouTube);
/// assert_eq!(job.platform(), "YouTube");
/// assert_eq!(job.request_id().len(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    chat_id: ChatId,
    url: String,
    kind: MediaKind,
    platform: String,
    request_id: String,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl Job {
    /// Creates a job with a fresh request id and the current timestamp.
    pub fn new(chat_id: ChatId, url: impl Into<String>, kind: MediaKind, platform: impl ToString) -> Self {
        Self::with_request_id(chat_id, url, kind, platform, new_request_id())
    }

    /// Creates a job with a caller-chosen request id.
    pub fn with_request_id(
        chat_id: ChatId,
        url: impl Into<String>,
        kind: MediaKind,
        platform: impl ToString,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            chat_id,
            url: url.into(),
            kind,
            platform: platform.to_string(),
            request_id: request_id.into(),
            created_at: Utc::now(),
        }
    }

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Platform tag as supplied by the producer.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Seconds since the job was created.
    pub fn age_secs(&self) -> i64 {
        (Utc::now() - self.created_at).num_seconds()
    }
}

/// Hex chars kept from a v4 UUID; files in the temp dir are matched by this prefix.
pub const REQUEST_ID_LEN: usize = 16;

/// Correlation id: the first [`REQUEST_ID_LEN`] hex chars of a v4 UUID.
pub fn new_request_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(REQUEST_ID_LEN);
    id
}
