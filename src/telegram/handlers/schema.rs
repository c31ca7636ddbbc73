//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_command, handle_text};
use super::types::{HandlerDeps, HandlerError, Reply, ReplyKeyboard};
use crate::telegram::bot::Command;
use crate::telegram::keyboards::{cancel_keyboard, main_keyboard};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// # Arguments
/// * `deps` - Handler dependencies (job queue, pending actions)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(command_handler(deps.clone()))
        .branch(message_handler(deps))
}

/// Handler for commands from the [`Command`] enum
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);
                let reply = handle_command(&deps, msg.chat.id, cmd);
                send_reply(&bot, msg.chat.id, reply).await
            }
        },
    ))
}

/// Handler for plain text: keyboard buttons and links
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let text = msg.text().unwrap_or_default();
                let reply = handle_text(&deps, msg.chat.id, text);
                send_reply(&bot, msg.chat.id, reply).await
            }
        })
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), HandlerError> {
    let request = bot.send_message(chat_id, reply.text);
    match reply.keyboard {
        ReplyKeyboard::Main => request.reply_markup(main_keyboard()).await?,
        ReplyKeyboard::Cancel => request.reply_markup(cancel_keyboard()).await?,
    };
    Ok(())
}
