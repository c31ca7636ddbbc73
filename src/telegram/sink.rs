//! Telegram delivery of finished jobs

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::download::job::MediaKind;
use crate::download::probe::probe_video_metadata;
use crate::download::sink::{Artifact, DeliveryError, ResultSink};
use crate::telegram::keyboards::main_keyboard;

/// [`ResultSink`] that uploads through the Bot API.
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Performer shown on audio uploads.
pub fn audio_performer(artifact: &Artifact) -> String {
    format!("from {}", artifact.platform)
}

#[async_trait]
impl ResultSink for TelegramSink {
    async fn send_artifact(&self, chat_id: ChatId, artifact: &Artifact, request_id: &str) -> Result<(), DeliveryError> {
        if !tokio::fs::try_exists(&artifact.path).await? {
            return Err(DeliveryError::Rejected(format!(
                "artifact {} disappeared before upload",
                artifact.path.display()
            )));
        }

        match artifact.kind {
            MediaKind::Video => {
                let mut req = self
                    .bot
                    .send_video(chat_id, InputFile::file(artifact.path.clone()))
                    .caption(artifact.title.clone())
                    .supports_streaming(true);
                if let Some(meta) = probe_video_metadata(&artifact.path, request_id).await {
                    if let (Some(w), Some(h)) = (meta.width, meta.height) {
                        req = req.width(w).height(h);
                    }
                    if let Some(d) = meta.duration_secs {
                        req = req.duration(d);
                    }
                }
                req.await?;
            }
            MediaKind::Audio => {
                self.bot
                    .send_audio(chat_id, InputFile::file(artifact.path.clone()))
                    .title(artifact.title.clone())
                    .performer(audio_performer(artifact))
                    .await?;
            }
        }

        log::info!("[{}] Sent {} to chat {}", request_id, artifact.kind, chat_id);
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str, request_id: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(chat_id, text)
            .reply_markup(main_keyboard())
            .await?;
        log::debug!("[{}] Sent text to chat {}", request_id, chat_id);
        Ok(())
    }
}
