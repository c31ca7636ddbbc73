//! Reply keyboards

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::core::messages::{AUDIO_BUTTON_TEXT, CANCEL_BUTTON_TEXT, VIDEO_BUTTON_TEXT};

/// "Video" / "Audio" keyboard shown while idle.
pub fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(VIDEO_BUTTON_TEXT),
        KeyboardButton::new(AUDIO_BUTTON_TEXT),
    ]])
    .resize_keyboard()
}

/// Single "Cancel" button shown while waiting for a link.
pub fn cancel_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(CANCEL_BUTTON_TEXT)]]).resize_keyboard()
}
