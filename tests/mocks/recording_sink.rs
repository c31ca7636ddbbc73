//! Result sink that records everything it is asked to send

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use teloxide::types::ChatId;

use fetchbot::download::sink::{Artifact, DeliveryError, ResultSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Artifact {
        chat_id: ChatId,
        artifact: Artifact,
        /// Whether the file was on disk when delivery was attempted
        existed: bool,
    },
    Text {
        chat_id: ChatId,
        text: String,
    },
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
    reject_artifacts: AtomicBool,
    reject_texts: AtomicBool,
    panic_on_artifacts: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A sink whose artifact uploads are refused by the transport.
    pub fn rejecting_artifacts() -> Arc<Self> {
        let sink = Self::default();
        sink.reject_artifacts.store(true, Ordering::SeqCst);
        Arc::new(sink)
    }

    /// A sink that cannot deliver anything.
    pub fn rejecting_everything() -> Arc<Self> {
        let sink = Self::default();
        sink.reject_artifacts.store(true, Ordering::SeqCst);
        sink.reject_texts.store(true, Ordering::SeqCst);
        Arc::new(sink)
    }

    /// A sink whose artifact upload panics after being recorded.
    pub fn panicking_on_artifacts() -> Arc<Self> {
        let sink = Self::default();
        sink.panic_on_artifacts.store(true, Ordering::SeqCst);
        Arc::new(sink)
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn artifacts(&self) -> Vec<(Artifact, bool)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Artifact { artifact, existed, .. } => Some((artifact, existed)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn send_artifact(&self, chat_id: ChatId, artifact: &Artifact, _request_id: &str) -> Result<(), DeliveryError> {
        self.events.lock().unwrap().push(SinkEvent::Artifact {
            chat_id,
            artifact: artifact.clone(),
            existed: artifact.path.exists(),
        });
        if self.panic_on_artifacts.load(Ordering::SeqCst) {
            panic!("upload of {} exploded", artifact.path.display());
        }
        if self.reject_artifacts.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected("Request Entity Too Large".to_string()));
        }
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str, _request_id: &str) -> Result<(), DeliveryError> {
        self.events.lock().unwrap().push(SinkEvent::Text {
            chat_id,
            text: text.to_string(),
        });
        if self.reject_texts.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected("chat not found".to_string()));
        }
        Ok(())
    }
}
