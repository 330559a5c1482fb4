//! Gfycat clips, always saved as GIF.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::fs::naming::{file_stem_from_url, with_extension};
use crate::http::Fetch;
use crate::media::hosts::{json_str, HostStrategy};
use crate::media::item::{MediaArtifact, MediaOutcome};

/// Gfycat metadata endpoint.
const API_BASE: &str = "https://api.gfycat.com/v1/gfycats";

#[derive(Debug, Clone, Copy, Default)]
pub struct GfycatStrategy;

#[async_trait]
impl HostStrategy for GfycatStrategy {
    fn name(&self) -> &'static str {
        "gfycat"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("gfycat.com")
    }

    async fn fetch(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        let gfycat_name = file_stem_from_url(url)?;
        let endpoint = format!("{}/{}", API_BASE, gfycat_name);

        let info = http.get_json(&endpoint, &[]).await?;
        let gif_url = json_str(&info, "/gfyItem/gifUrl", &endpoint)?;

        let file_path = media_dir.join(with_extension(&gfycat_name, "gif"));
        tracing::info!(
            "Downloading Gfycat at URL {} to {}",
            gif_url,
            file_path.display()
        );

        let path = http.save_file(gif_url, &file_path).await?;
        Ok(MediaOutcome::Downloaded(MediaArtifact::new(path, gif_url)))
    }
}
