//! Fallback for any other host, decided by the response MIME type.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::fs::naming::file_name_from_url;
use crate::http::Fetch;
use crate::media::hosts::HostStrategy;
use crate::media::item::{MediaArtifact, MediaOutcome};

/// MIME types accepted as postable images.
pub const IMAGE_FORMATS: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

#[async_trait]
impl HostStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn matches(&self, _url: &str) -> bool {
        true
    }

    async fn fetch(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        let content_type = http.content_type(url).await?;

        if !content_type.as_deref().map(is_image_type).unwrap_or(false) {
            tracing::info!(
                "URL {} does not point to a valid image file (content-type {:?})",
                url,
                content_type
            );
            return Ok(MediaOutcome::NotMedia);
        }

        let file_name = file_name_from_url(url)?;
        let file_path = media_dir.join(file_name);
        tracing::info!("Downloading file at URL {} to {}", url, file_path.display());

        let path = http.save_file(url, &file_path).await?;
        Ok(MediaOutcome::Downloaded(MediaArtifact::new(path, url)))
    }
}

/// Whether a `content-type` header value names an accepted image format.
fn is_image_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    IMAGE_FORMATS.contains(&essence.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeFetch;

    #[test]
    fn test_is_image_type() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("IMAGE/JPEG; charset=binary"));
        assert!(is_image_type("image/webp"));
        assert!(!is_image_type("image/svg+xml"));
        assert!(!is_image_type("text/html; charset=utf-8"));
        assert!(!is_image_type(""));
    }

    #[tokio::test]
    async fn test_html_page_is_not_media() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://example.com/article";
        let http = FakeFetch::new().with_content_type(url, "text/html; charset=utf-8");

        let outcome = GenericStrategy.fetch(&http, url, dir.path()).await.unwrap();
        assert_eq!(outcome, MediaOutcome::NotMedia);
        assert_eq!(http.requested(), vec![url]);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_not_media() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new();

        let outcome = GenericStrategy
            .fetch(&http, "https://example.com/blob", dir.path())
            .await
            .unwrap();
        assert_eq!(outcome, MediaOutcome::NotMedia);
    }

    #[tokio::test]
    async fn test_image_is_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://cdn.example.com/photos/sunset.webp";
        let http = FakeFetch::new()
            .with_content_type(url, "image/webp")
            .with_file(url, b"RIFF....WEBP");

        let outcome = GenericStrategy.fetch(&http, url, dir.path()).await.unwrap();
        assert_eq!(
            outcome,
            MediaOutcome::Downloaded(MediaArtifact::new(dir.path().join("sunset.webp"), url))
        );
    }
}
