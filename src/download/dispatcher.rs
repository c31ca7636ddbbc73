use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::download::fetcher::MediaFetcher;
use crate::download::job::Platform;
use crate::download::source::{InstagramSource, MediaSource, TwitterSource, YouTubeSource};

/// Maps platform tags to fetch strategies.
///
/// A tag outside the registered set resolves to `None`; the worker turns
/// that into an "unsupported platform" notice without fetching anything.
pub struct PlatformDispatcher {
    sources: HashMap<Platform, Arc<dyn MediaSource>>,
}

impl PlatformDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self { sources: HashMap::new() }
    }

    /// Register a strategy under its own platform, replacing any previous one.
    pub fn register(&mut self, source: Arc<dyn MediaSource>) {
        let platform = source.platform();
        if self.sources.insert(platform, source).is_some() {
            log::warn!("Replacing fetch strategy for {}", platform);
        }
    }

    /// Find the strategy for a platform tag.
    pub fn resolve(&self, tag: &str) -> Option<Arc<dyn MediaSource>> {
        let platform = Platform::from_str(tag.trim()).ok()?;
        self.sources.get(&platform).cloned()
    }

    /// Platforms that currently have a strategy.
    pub fn platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.sources.keys().copied().collect();
        platforms.sort_by_key(|p| p.to_string());
        platforms
    }

    /// Create a dispatcher with the built-in strategies sharing one fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn MediaFetcher>, size_limit: u64, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let mut dispatcher = Self::new();
        dispatcher.register(Arc::new(YouTubeSource::new(fetcher.clone(), size_limit, output_dir.clone())));
        dispatcher.register(Arc::new(TwitterSource::new(fetcher.clone(), size_limit, output_dir.clone())));
        dispatcher.register(Arc::new(InstagramSource::new(fetcher, size_limit, output_dir)));
        dispatcher
    }
}

impl Default for PlatformDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
