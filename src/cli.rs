use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fetchbot")]
#[command(author, version, about = "Telegram bot that downloads video and audio from YouTube, Twitter and Instagram", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default)
    Run,

    /// Fetch a single link through the same pipeline the bot uses
    Fetch {
        /// Link to a YouTube, Twitter or Instagram post
        url: String,

        /// Extract audio instead of video
        #[arg(long)]
        audio: bool,

        /// Keep the file instead of deleting it afterwards
        #[arg(long)]
        keep: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
