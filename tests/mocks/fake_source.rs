//! Scripted fetch strategy
//!
//! Each URL can be given a [`Behavior`]; URLs without one produce a small
//! file. Every call is appended to a shared [`CallLog`] so tests can check
//! ordering across platforms.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use fetchbot::download::error::DownloadError;
use fetchbot::download::guard::TempFileGuard;
use fetchbot::download::job::{MediaKind, Platform};
use fetchbot::download::source::{DownloadResult, MediaSource};

/// What a fake fetch does for a given URL.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Create a (sparse) file of the given size
    Produce { bytes: u64, title: &'static str },
    /// Fail with a classified error
    Fail(DownloadError),
    /// Panic inside the fetch
    Panic,
    /// Report a path that does not exist
    Missing,
    /// Write a `.part` file and sleep, then turn it into a small finished file
    Hang(Duration),
    /// Wait until notified, then produce a small file
    Gate(Arc<Notify>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub platform: Platform,
    pub url: String,
    pub kind: MediaKind,
    pub request_id: String,
}

/// Fetch calls shared between several fake sources.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<FetchCall>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<FetchCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn push(&self, call: FetchCall) {
        self.0.lock().unwrap().push(call);
    }
}

pub struct FakeSource {
    platform: Platform,
    dir: PathBuf,
    calls: CallLog,
    behaviors: Mutex<HashMap<String, Behavior>>,
}

impl FakeSource {
    pub fn new(platform: Platform, dir: impl Into<PathBuf>, calls: CallLog) -> Self {
        Self {
            platform,
            dir: dir.into(),
            calls,
            behaviors: Mutex::new(HashMap::new()),
        }
    }

    pub fn on(self, url: &str, behavior: Behavior) -> Self {
        self.behaviors.lock().unwrap().insert(url.to_string(), behavior);
        self
    }

    fn behavior_for(&self, url: &str) -> Behavior {
        self.behaviors
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(Behavior::Produce {
                bytes: 1024,
                title: "Fake clip",
            })
    }

    fn produce(&self, request_id: &str, bytes: u64, title: &str) -> DownloadResult {
        let path = self.dir.join(format!("{}.mp4", request_id));
        let file = File::create(&path).unwrap();
        file.set_len(bytes).unwrap();
        DownloadResult {
            file: TempFileGuard::new(path),
            title: title.to_string(),
        }
    }

    async fn run(&self, kind: MediaKind, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        self.calls.push(FetchCall {
            platform: self.platform,
            url: url.to_string(),
            kind,
            request_id: request_id.to_string(),
        });

        match self.behavior_for(url) {
            Behavior::Produce { bytes, title } => Ok(self.produce(request_id, bytes, title)),
            Behavior::Fail(err) => Err(err),
            Behavior::Panic => panic!("fake source exploded on {}", url),
            Behavior::Missing => Ok(DownloadResult {
                file: TempFileGuard::new(self.dir.join(format!("{}.gone.mp4", request_id))),
                title: "Ghost".to_string(),
            }),
            Behavior::Hang(duration) => {
                let partial = self.dir.join(format!("{}.mp4.part", request_id));
                std::fs::write(&partial, b"partial").unwrap();
                tokio::time::sleep(duration).await;
                std::fs::remove_file(&partial).unwrap();
                Ok(self.produce(request_id, 1024, "Slow clip"))
            }
            Behavior::Gate(gate) => {
                gate.notified().await;
                Ok(self.produce(request_id, 1024, "Gated clip"))
            }
        }
    }
}

#[async_trait]
impl MediaSource for FakeSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_video(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        self.run(MediaKind::Video, url, request_id).await
    }

    async fn fetch_audio(&self, url: &str, request_id: &str) -> Result<DownloadResult, DownloadError> {
        self.run(MediaKind::Audio, url, request_id).await
    }
}
