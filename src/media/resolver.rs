//! Media resolution: pick a host strategy for a URL and run it.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::fs::paths::ensure_dir;
use crate::http::Fetch;
use crate::media::hosts::{default_strategies, HostStrategy};
use crate::media::item::MediaOutcome;

/// Resolves submission URLs into local media files.
pub struct MediaResolver {
    http: Arc<dyn Fetch>,
    media_dir: PathBuf,
    strategies: Vec<Box<dyn HostStrategy>>,
}

impl MediaResolver {
    /// Build a resolver with the standard host order.
    pub fn new(http: Arc<dyn Fetch>, config: &Config) -> Self {
        Self::with_strategies(
            http,
            config.media.media_folder.clone(),
            default_strategies(&config.imgur),
        )
    }

    /// Build a resolver with an explicit, ordered strategy list.
    pub fn with_strategies(
        http: Arc<dyn Fetch>,
        media_dir: PathBuf,
        strategies: Vec<Box<dyn HostStrategy>>,
    ) -> Self {
        Self {
            http,
            media_dir,
            strategies,
        }
    }

    /// First strategy whose pattern matches `url`.
    pub fn strategy_for(&self, url: &str) -> Option<&dyn HostStrategy> {
        self.strategies
            .iter()
            .find(|s| s.matches(url))
            .map(|s| s.as_ref())
    }

    /// Download the media behind `url`, if there is any.
    pub async fn resolve(&self, url: &str) -> Result<MediaOutcome> {
        if ensure_dir(&self.media_dir).await? {
            tracing::info!(
                "Media folder not found, created {}",
                self.media_dir.display()
            );
        }

        let Some(strategy) = self.strategy_for(url) else {
            tracing::debug!("No host strategy matched {}", url);
            return Ok(MediaOutcome::NotMedia);
        };

        tracing::debug!("Resolving {} with the {} strategy", url, strategy.name());
        strategy.fetch(self.http.as_ref(), url, &self.media_dir).await
    }
}
