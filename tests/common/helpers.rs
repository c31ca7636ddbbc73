//! Helper functions for tests

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;
use teloxide::types::ChatId;

use fetchbot::download::job::{Job, MediaKind};
use fetchbot::download::queue::JobQueue;
use fetchbot::download::worker::WorkerSettings;

pub const CHAT: ChatId = ChatId(123456789);
pub const MIB: u64 = 1024 * 1024;

/// Worker settings with the production size limit and short timers.
pub fn test_settings(temp_dir: &Path) -> WorkerSettings {
    WorkerSettings {
        size_limit: 49 * MIB,
        error_backoff: Duration::from_millis(50),
        shutdown_grace: Duration::from_millis(200),
        temp_dir: temp_dir.to_path_buf(),
    }
}

/// Builds a job; the platform is a free-form tag so unknown ones can be tested.
pub fn job(url: &str, kind: MediaKind, platform: &str) -> Job {
    Job::new(CHAT, url, kind, platform)
}

/// Waits until every enqueued job was acknowledged.
pub async fn wait_drained(queue: &JobQueue) {
    tokio::time::timeout(Duration::from_secs(5), queue.join())
        .await
        .expect("queue should drain");
}
