//! Giphy GIFs resolved through the oEmbed endpoint.

use std::path::Path;

use async_trait::async_trait;

use crate::dedup::hash::hash_md5;
use crate::error::{Error, Result};
use crate::fs::naming::{path_segments, sanitize_filename, with_extension};
use crate::fs::paths::remove_media;
use crate::http::Fetch;
use crate::media::hosts::HostStrategy;
use crate::media::item::{MediaArtifact, MediaOutcome};

/// Giphy oEmbed endpoint.
const OEMBED_ENDPOINT: &str = "https://giphy.com/services/oembed/";

/// MD5 of the "This content is not available" GIF Giphy serves for removed media.
pub const PLACEHOLDER_MD5: &str = "59a41d58693283c72d9da8ae0561e4e5";

#[derive(Debug, Clone)]
pub struct GiphyStrategy {
    placeholder_hashes: Vec<String>,
}

impl GiphyStrategy {
    pub fn new() -> Self {
        Self::with_placeholders(vec![PLACEHOLDER_MD5.to_string()])
    }

    /// Use a custom set of placeholder digests.
    pub fn with_placeholders(placeholder_hashes: Vec<String>) -> Self {
        Self { placeholder_hashes }
    }

    fn is_placeholder(&self, digest: &str) -> bool {
        self.placeholder_hashes.iter().any(|h| h == digest)
    }
}

impl Default for GiphyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostStrategy for GiphyStrategy {
    fn name(&self) -> &'static str {
        "giphy"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("giphy.com")
    }

    async fn fetch(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        let endpoint = format!("{}?url={}", OEMBED_ENDPOINT, urlencoding::encode(url));
        let info = http.get_json(&endpoint, &[]).await?;

        let gif_url = info
            .get(url)
            .or_else(|| info.get("url"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Api(format!("No GIF URL for {} in oEmbed response", url)))?;

        let giphy_id = giphy_identifier(url)?;
        let file_path = media_dir.join(with_extension(&giphy_id, "gif"));
        tracing::info!(
            "Downloading Giphy at URL {} to {}",
            gif_url,
            file_path.display()
        );

        let path = http.save_file(gif_url, &file_path).await?;

        if self.is_placeholder(&hash_md5(&path).await?) {
            tracing::warn!("File from url {} could not be found (placeholder GIF)", gif_url);
            remove_media(&path).await;
            return Ok(MediaOutcome::Unresolvable);
        }

        Ok(MediaOutcome::Downloaded(MediaArtifact::new(path, gif_url)))
    }
}

/// Derive a stable identifier from a Giphy page or media URL.
///
/// `giphy.com/gifs/funny-cat-abc123` yields `funny-cat-abc123`;
/// `media.giphy.com/media/abc123/giphy.gif` yields `abc123`.
fn giphy_identifier(url: &str) -> Result<String> {
    let segments = path_segments(url)?;
    let last = segments
        .last()
        .ok_or_else(|| Error::InvalidFilename(format!("No Giphy id in URL: {}", url)))?;

    let id = if Path::new(last).extension().is_some() && segments.len() >= 2 {
        &segments[segments.len() - 2]
    } else {
        last
    };

    sanitize_filename(id)
}
