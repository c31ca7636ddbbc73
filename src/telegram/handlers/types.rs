//! Handler types and dependencies

use dashmap::DashMap;
use std::sync::Arc;
use teloxide::types::ChatId;

use crate::download::job::MediaKind;
use crate::download::queue::JobQueue;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub queue: Arc<JobQueue>,
    /// Kind chosen with a keyboard button, waiting for the link
    pub pending: Arc<DashMap<ChatId, MediaKind>>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(queue: Arc<JobQueue>) -> Self {
        Self {
            queue,
            pending: Arc::new(DashMap::new()),
        }
    }
}

/// Which reply keyboard accompanies a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKeyboard {
    Main,
    Cancel,
}

/// Text and keyboard sent back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: ReplyKeyboard,
}

impl Reply {
    pub fn main(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: ReplyKeyboard::Main,
        }
    }

    pub fn cancel(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: ReplyKeyboard::Cancel,
        }
    }
}
