//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "I can:")]
pub enum Command {
    #[command(description = "show the main keyboard")]
    Start,
    #[command(description = "how to use the bot")]
    Help,
    #[command(description = "cancel the pending action")]
    Cancel,
    #[command(description = "download video from a link")]
    Video(String),
    #[command(description = "download audio from a link")]
    Audio(String),
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token, invalid URL or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    if config::BOT_TOKEN.is_empty() {
        anyhow::bail!("BOT_TOKEN (or TELOXIDE_TOKEN) is not set");
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(config::BOT_TOKEN.as_str(), client);

    // Check if local Bot API server is configured
    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(command_list()).await?;
    Ok(())
}

/// Commands shown in the Telegram command menu.
pub fn command_list() -> Vec<BotCommand> {
    Command::bot_commands()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "fetchbot").unwrap(), Command::Start);
        assert_eq!(
            Command::parse("/video https://youtu.be/abc", "fetchbot").unwrap(),
            Command::Video("https://youtu.be/abc".to_string())
        );
        assert_eq!(
            Command::parse("/audio https://x.com/a/status/1", "fetchbot").unwrap(),
            Command::Audio("https://x.com/a/status/1".to_string())
        );
        assert!(Command::parse("/unknown", "fetchbot").is_err());
    }

    #[test]
    fn test_command_list() {
        let names: Vec<String> = command_list()
            .into_iter()
            .map(|c| c.command.trim_start_matches('/').to_string())
            .collect();
        assert_eq!(names, vec!["start", "help", "cancel", "video", "audio"]);
    }
}
