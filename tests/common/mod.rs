//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod helpers;

#[allow(unused_imports)]
pub use helpers::{job, test_settings, wait_drained, CHAT, MIB};
