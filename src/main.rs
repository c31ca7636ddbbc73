use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;

use fetchbot::cli::{Cli, Commands};
use fetchbot::core::{config, init_logger, messages, validate_url};
use fetchbot::download::job::new_request_id;
use fetchbot::download::{
    JobQueue, MediaKind, MediaSource, PlatformDispatcher, Worker, WorkerSettings, YtDlpFetcher,
};
use fetchbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramSink};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, temp directory, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    // Log panics that escape a task instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {}", panic_info);
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Fetch { url, audio, keep }) => run_cli_fetch(url, audio, keep).await,
    }
}

/// Creates the temp directory the fetchers write into
async fn prepare_temp_dir() -> Result<PathBuf> {
    let dir = PathBuf::from(config::TEMP_FILES_DIR.as_str());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create temp directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

/// Run the bot until Ctrl-C
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let temp_dir = prepare_temp_dir().await?;
    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let settings = WorkerSettings::from_config();
    let grace = settings.shutdown_grace;
    let queue = Arc::new(JobQueue::new());
    let dispatcher = Arc::new(PlatformDispatcher::with_fetcher(
        Arc::new(YtDlpFetcher::from_config()),
        settings.size_limit,
        &temp_dir,
    ));
    let sink = Arc::new(TelegramSink::new(bot.clone()));

    let cancel = CancellationToken::new();
    let worker = Worker::new(Arc::clone(&queue), dispatcher, sink, settings).spawn(cancel.clone());

    let deps = HandlerDeps::new(Arc::clone(&queue));
    log::info!("Bot is running, press Ctrl-C to stop");

    Dispatcher::builder(bot, schema(deps))
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher stopped, shutting down worker");
    cancel.cancel();
    match tokio::time::timeout(grace + Duration::from_secs(1), worker).await {
        Ok(Ok(())) => log::info!("Worker shut down cleanly"),
        Ok(Err(e)) => log::error!("Worker task failed: {}", e),
        Err(_) => log::warn!("Worker did not stop within {:?}", grace + Duration::from_secs(1)),
    }

    let left = queue.len();
    if left > 0 {
        log::warn!("{} queued job(s) dropped at shutdown", left);
    }
    Ok(())
}

/// Fetch a single link from the command line
async fn run_cli_fetch(url: String, audio: bool, keep: bool) -> Result<()> {
    let platform = validate_url(&url).map_err(|e| anyhow::anyhow!("{}", e))?;
    let kind = if audio { MediaKind::Audio } else { MediaKind::Video };
    let temp_dir = prepare_temp_dir().await?;

    let size_limit = *config::MAX_FILE_SIZE_BYTES;
    let dispatcher = PlatformDispatcher::with_fetcher(Arc::new(YtDlpFetcher::from_config()), size_limit, &temp_dir);
    let source = dispatcher
        .resolve(&platform.to_string())
        .ok_or_else(|| anyhow::anyhow!("No strategy for {}", platform))?;

    let request_id = new_request_id();
    println!("Fetching {} from {} [{}]", kind, platform, request_id);

    let result = source
        .fetch(kind, &url, &request_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let size = tokio::fs::metadata(result.file.path()).await.map(|m| m.len()).unwrap_or(0);
    println!("Title: {}", result.title);
    println!("Size:  {}", messages::format_size_mb(size));

    if keep {
        let path = result.file.persist();
        println!("Saved: {}", path.display());
    } else {
        println!("File:  {} (deleted)", result.file.path().display());
        result.file.release().await;
    }
    Ok(())
}
