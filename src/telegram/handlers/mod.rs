//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! The reply logic lives in plain functions so it can be tested without a
//! running bot.

pub mod commands;
mod schema;
mod types;

pub use commands::{handle_command, handle_text, submit_link};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError, Reply, ReplyKeyboard};
