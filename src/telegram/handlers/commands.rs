//! Request front-end: commands, keyboard flow and job submission
//!
//! Everything here works on plain values and returns a [`Reply`]; sending it
//! is left to the dispatcher schema.

use teloxide::types::ChatId;

use super::types::{HandlerDeps, Reply};
use crate::core::messages;
use crate::core::validation::validate_url;
use crate::download::job::{Job, MediaKind};
use crate::telegram::bot::Command;

/// Handles a parsed bot command.
pub fn handle_command(deps: &HandlerDeps, chat_id: ChatId, cmd: Command) -> Reply {
    match cmd {
        Command::Start | Command::Help => {
            deps.pending.remove(&chat_id);
            Reply::main(messages::HELP_MESSAGE)
        }
        Command::Cancel => cancel_pending(deps, chat_id),
        Command::Video(arg) => request_or_await(deps, chat_id, MediaKind::Video, &arg),
        Command::Audio(arg) => request_or_await(deps, chat_id, MediaKind::Audio, &arg),
    }
}

/// Handles a plain text message.
pub fn handle_text(deps: &HandlerDeps, chat_id: ChatId, text: &str) -> Reply {
    let text = text.trim();
    match text {
        messages::VIDEO_BUTTON_TEXT => await_link(deps, chat_id, MediaKind::Video),
        messages::AUDIO_BUTTON_TEXT => await_link(deps, chat_id, MediaKind::Audio),
        messages::CANCEL_BUTTON_TEXT => cancel_pending(deps, chat_id),
        _ if text.starts_with('/') => Reply::main(messages::UNKNOWN_COMMAND_MESSAGE),
        _ => match deps.pending.get(&chat_id).map(|kind| *kind) {
            Some(kind) => submit_link(deps, chat_id, kind, text),
            None => Reply::main(messages::USE_BUTTONS_WARN),
        },
    }
}

/// Validates a link and enqueues a job for it.
///
/// On a rejected link the pending action stays so the user can retry.
pub fn submit_link(deps: &HandlerDeps, chat_id: ChatId, kind: MediaKind, text: &str) -> Reply {
    match validate_url(text) {
        Ok(platform) => {
            deps.pending.remove(&chat_id);
            let job = Job::new(chat_id, text.trim(), kind, platform);
            log::info!(
                "[{}] Accepted {} link from chat {}: {}",
                job.request_id(),
                kind,
                chat_id,
                job.url()
            );
            deps.queue.enqueue(job);
            Reply::main(messages::QUEUE_MESSAGE)
        }
        Err(e) => {
            log::info!("Rejected link from chat {}: {}", chat_id, e);
            deps.pending.insert(chat_id, kind);
            Reply::cancel(e.user_message())
        }
    }
}

fn request_or_await(deps: &HandlerDeps, chat_id: ChatId, kind: MediaKind, arg: &str) -> Reply {
    if arg.trim().is_empty() {
        await_link(deps, chat_id, kind)
    } else {
        submit_link(deps, chat_id, kind, arg)
    }
}

fn await_link(deps: &HandlerDeps, chat_id: ChatId, kind: MediaKind) -> Reply {
    deps.pending.insert(chat_id, kind);
    Reply::cancel(messages::WAIT_FOR_LINK)
}

fn cancel_pending(deps: &HandlerDeps, chat_id: ChatId) -> Reply {
    match deps.pending.remove(&chat_id) {
        Some(_) => Reply::main(messages::ACTION_CANCEL),
        None => Reply::main(messages::ACTION_EMPTY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::queue::JobQueue;
    use crate::telegram::handlers::types::ReplyKeyboard;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const CHAT: ChatId = ChatId(100);

    fn deps() -> HandlerDeps {
        HandlerDeps::new(Arc::new(JobQueue::new()))
    }

    #[tokio::test]
    async fn test_button_then_link_enqueues_job() {
        let deps = deps();
        let reply = handle_text(&deps, CHAT, messages::AUDIO_BUTTON_TEXT);
        assert_eq!(reply, Reply::cancel(messages::WAIT_FOR_LINK));

        let reply = handle_text(&deps, CHAT, "https://www.instagram.com/reel/Cabc/");
        assert_eq!(reply, Reply::main(messages::QUEUE_MESSAGE));
        assert!(deps.pending.get(&CHAT).is_none());

        let job = deps.queue.dequeue().await;
        assert_eq!(job.kind(), MediaKind::Audio);
        assert_eq!(job.platform(), "Instagram");
        assert_eq!(job.chat_id(), CHAT);
    }

    #[test]
    fn test_invalid_link_keeps_pending_action() {
        let deps = deps();
        handle_text(&deps, CHAT, messages::VIDEO_BUTTON_TEXT);

        let reply = handle_text(&deps, CHAT, "https://www.tiktok.com/@x/video/1");
        assert_eq!(reply.text, messages::UNSUPPORTED_DOMAIN_MESSAGE);
        assert_eq!(reply.keyboard, ReplyKeyboard::Cancel);
        assert_eq!(deps.pending.get(&CHAT).map(|k| *k), Some(MediaKind::Video));
        assert!(deps.queue.is_empty());
    }

    #[test]
    fn test_text_without_pending_action() {
        let deps = deps();
        assert_eq!(
            handle_text(&deps, CHAT, "https://youtu.be/abc"),
            Reply::main(messages::USE_BUTTONS_WARN)
        );
        assert_eq!(
            handle_text(&deps, CHAT, "/nope"),
            Reply::main(messages::UNKNOWN_COMMAND_MESSAGE)
        );
        assert!(deps.queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let deps = deps();
        assert_eq!(handle_command(&deps, CHAT, Command::Cancel), Reply::main(messages::ACTION_EMPTY));

        handle_text(&deps, CHAT, messages::VIDEO_BUTTON_TEXT);
        assert_eq!(
            handle_text(&deps, CHAT, messages::CANCEL_BUTTON_TEXT),
            Reply::main(messages::ACTION_CANCEL)
        );
        assert!(deps.pending.is_empty());
    }

    #[test]
    fn test_video_command_with_and_without_link() {
        let deps = deps();
        let reply = handle_command(&deps, CHAT, Command::Video("https://x.com/a/status/1".into()));
        assert_eq!(reply, Reply::main(messages::QUEUE_MESSAGE));
        assert_eq!(deps.queue.len(), 1);

        let reply = handle_command(&deps, CHAT, Command::Video(String::new()));
        assert_eq!(reply, Reply::cancel(messages::WAIT_FOR_LINK));
        assert_eq!(deps.pending.get(&CHAT).map(|k| *k), Some(MediaKind::Video));
    }

    #[test]
    fn test_help_clears_pending() {
        let deps = deps();
        handle_text(&deps, CHAT, messages::AUDIO_BUTTON_TEXT);
        assert_eq!(handle_command(&deps, CHAT, Command::Help), Reply::main(messages::HELP_MESSAGE));
        assert!(deps.pending.is_empty());
    }
}
