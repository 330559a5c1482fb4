//! Reddit-hosted images (`i.redd.it`, `i.reddituploads.com`).

use std::path::Path;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::fs::naming::{extension_from_url, file_name_from_url};
use crate::http::Fetch;
use crate::media::hosts::HostStrategy;
use crate::media::item::{MediaArtifact, MediaOutcome};

/// Extension assumed for Reddit asset URLs without one.
const DEFAULT_EXTENSION: &str = ".jpg";

#[derive(Debug, Clone, Copy, Default)]
pub struct RedditStrategy;

#[async_trait]
impl HostStrategy for RedditStrategy {
    fn name(&self) -> &'static str {
        "reddit"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("redd.it") || url.contains("reddituploads.com")
    }

    async fn fetch(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        let mut file_name = file_name_from_url(url)?;
        let mut fetch_url = url.to_string();

        // reddituploads links carry no extension but serve fine with one appended
        let extension = match extension_from_url(url)? {
            Some(ext) => ext,
            None => {
                file_name.push_str(DEFAULT_EXTENSION);
                fetch_url = append_to_path(url, DEFAULT_EXTENSION)?;
                DEFAULT_EXTENSION.to_string()
            }
        };

        let file_path = media_dir.join(&file_name);
        tracing::info!(
            "Downloading Reddit media at URL {} to {}, file type identified as {}",
            fetch_url,
            file_path.display(),
            extension
        );

        let path = http.save_file(&fetch_url, &file_path).await?;
        Ok(MediaOutcome::Downloaded(MediaArtifact::new(path, fetch_url)))
    }
}

/// Append a suffix to the URL path, leaving any query string in place.
fn append_to_path(url: &str, suffix: &str) -> Result<String> {
    let mut parsed = Url::parse(url)?;
    let path = format!("{}{}", parsed.path().trim_end_matches('/'), suffix);
    parsed.set_path(&path);
    Ok(parsed.to_string())
}
