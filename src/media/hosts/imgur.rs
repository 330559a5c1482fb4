//! Imgur images, albums and galleries.
//!
//! Every shape goes through the v3 metadata API first to find the direct
//! image link. Albums only ever yield their first image.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::fs::naming::{file_name_from_url, file_stem_from_url};
use crate::http::Fetch;
use crate::media::hosts::{json_str, HostStrategy};
use crate::media::item::{MediaArtifact, MediaOutcome};

/// Imgur API base URL.
const API_BASE: &str = "https://api.imgur.com/3";

/// Metadata object kinds exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImgurObject {
    Image,
    Album,
    Gallery,
}

impl ImgurObject {
    fn as_str(self) -> &'static str {
        match self {
            ImgurObject::Image => "image",
            ImgurObject::Album => "album",
            ImgurObject::Gallery => "gallery",
        }
    }

    /// Classify a page URL by its shape.
    fn classify(url: &str) -> Self {
        if url.contains("/a/") {
            ImgurObject::Album
        } else if url.contains("/gallery/") {
            ImgurObject::Gallery
        } else {
            ImgurObject::Image
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImgurStrategy {
    client_id: String,
    client_secret: String,
}

impl ImgurStrategy {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    fn check_credentials(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::MissingConfig(
                "imgur.client_id (Imgur client must not be empty)".to_string(),
            ));
        }
        if self.client_secret.trim().is_empty() {
            return Err(Error::MissingConfig(
                "imgur.client_secret (Imgur client secret must not be empty)".to_string(),
            ));
        }
        Ok(())
    }

    /// Fetch the metadata for any object/id pair.
    async fn endpoint(
        &self,
        http: &dyn Fetch,
        url: &str,
        object: ImgurObject,
    ) -> Result<serde_json::Value> {
        let object_id = file_stem_from_url(url)?;
        let endpoint = format!("{}/{}/{}", API_BASE, object.as_str(), object_id);
        let authorization = format!("Client-ID {}", self.client_id);

        http.get_json(&endpoint, &[("Authorization", authorization.as_str())])
            .await
    }

    async fn image(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        let body = self.endpoint(http, url, ImgurObject::Image).await?;
        let link = json_str(&body, "/data/link", "imgur image endpoint")?;
        download_image(http, link, media_dir).await
    }

    async fn album(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        let body = self.endpoint(http, url, ImgurObject::Album).await?;

        let images = body
            .pointer("/data/images")
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0);
        if images == 0 {
            tracing::warn!("Imgur album {} has no images", url);
            return Ok(MediaOutcome::Unresolvable);
        }
        if images > 1 {
            tracing::debug!("Imgur album {} has {} images, using the first", url, images);
        }

        let link = json_str(&body, "/data/images/0/link", "imgur album endpoint")?;
        download_image(http, link, media_dir).await
    }

    async fn gallery(
        &self,
        http: &dyn Fetch,
        url: &str,
        media_dir: &Path,
    ) -> Result<MediaOutcome> {
        let body = self.endpoint(http, url, ImgurObject::Gallery).await?;
        let is_album = body
            .pointer("/data/is_album")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if is_album {
            self.album(http, url, media_dir).await
        } else {
            self.image(http, url, media_dir).await
        }
    }
}

#[async_trait]
impl HostStrategy for ImgurStrategy {
    fn name(&self) -> &'static str {
        "imgur"
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("imgur.com")
    }

    async fn fetch(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome> {
        self.check_credentials()?;

        match ImgurObject::classify(url) {
            ImgurObject::Album => self.album(http, url, media_dir).await,
            ImgurObject::Gallery => self.gallery(http, url, media_dir).await,
            ImgurObject::Image => self.image(http, url, media_dir).await,
        }
    }
}

/// Download a direct `i.imgur.com` link.
async fn download_image(http: &dyn Fetch, link: &str, media_dir: &Path) -> Result<MediaOutcome> {
    let file_name = file_name_from_url(link)?;
    let file_path = media_dir.join(file_name);
    tracing::info!(
        "Downloading Imgur media at URL {} to {}",
        link,
        file_path.display()
    );

    let path = http.save_file(link, &file_path).await?;
    Ok(MediaOutcome::Downloaded(MediaArtifact::new(path, link)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeFetch;
    use serde_json::json;

    fn strategy() -> ImgurStrategy {
        ImgurStrategy::new("client".into(), "secret".into())
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            ImgurObject::classify("https://imgur.com/a/AbC"),
            ImgurObject::Album
        );
        assert_eq!(
            ImgurObject::classify("https://imgur.com/gallery/AbC"),
            ImgurObject::Gallery
        );
        assert_eq!(
            ImgurObject::classify("https://i.imgur.com/AbC.jpg"),
            ImgurObject::Image
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new();
        let strategy = ImgurStrategy::new("client".into(), String::new());

        let err = strategy
            .fetch(&http, "https://i.imgur.com/AbC.jpg", dir.path())
            .await
            .unwrap_err();

        assert!(err.is_config());
        assert!(http.requested().is_empty());
    }

    #[tokio::test]
    async fn test_single_image() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new()
            .with_json(
                "https://api.imgur.com/3/image/AbC",
                json!({ "data": { "link": "https://i.imgur.com/AbC.png" } }),
            )
            .with_file("https://i.imgur.com/AbC.png", b"png");

        let outcome = strategy()
            .fetch(&http, "https://imgur.com/AbC", dir.path())
            .await
            .unwrap();

        assert_eq!(
            outcome.into_artifact().unwrap().path,
            dir.path().join("AbC.png")
        );
        let headers = http.headers.lock().unwrap().clone();
        assert_eq!(
            headers,
            vec![("Authorization".to_string(), "Client-ID client".to_string())]
        );
    }

    #[tokio::test]
    async fn test_album_downloads_only_first_image() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new()
            .with_json(
                "https://api.imgur.com/3/album/XyZ",
                json!({ "data": { "is_album": true, "images": [
                    { "link": "https://i.imgur.com/first.jpg" },
                    { "link": "https://i.imgur.com/second.jpg" }
                ] } }),
            )
            .with_file("https://i.imgur.com/first.jpg", b"first")
            .with_file("https://i.imgur.com/second.jpg", b"second");

        let outcome = strategy()
            .fetch(&http, "https://imgur.com/a/XyZ", dir.path())
            .await
            .unwrap();

        assert_eq!(
            outcome.into_artifact().unwrap().path,
            dir.path().join("first.jpg")
        );
        assert_eq!(
            http.requested(),
            vec![
                "https://api.imgur.com/3/album/XyZ",
                "https://i.imgur.com/first.jpg"
            ]
        );
        assert!(!dir.path().join("second.jpg").exists());
    }

    #[tokio::test]
    async fn test_empty_album_is_unresolvable() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new().with_json(
            "https://api.imgur.com/3/album/Empty",
            json!({ "data": { "images": [] } }),
        );

        let outcome = strategy()
            .fetch(&http, "https://imgur.com/a/Empty", dir.path())
            .await
            .unwrap();
        assert_eq!(outcome, MediaOutcome::Unresolvable);
    }

    #[tokio::test]
    async fn test_gallery_redirects_to_album() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new()
            .with_json(
                "https://api.imgur.com/3/gallery/Gal",
                json!({ "data": { "is_album": true } }),
            )
            .with_json(
                "https://api.imgur.com/3/album/Gal",
                json!({ "data": { "images": [ { "link": "https://i.imgur.com/g1.gif" } ] } }),
            )
            .with_file("https://i.imgur.com/g1.gif", b"gif");

        let outcome = strategy()
            .fetch(&http, "https://imgur.com/gallery/Gal", dir.path())
            .await
            .unwrap();

        assert!(outcome.is_downloaded());
        assert_eq!(
            http.requested(),
            vec![
                "https://api.imgur.com/3/gallery/Gal",
                "https://api.imgur.com/3/album/Gal",
                "https://i.imgur.com/g1.gif"
            ]
        );
    }

    #[tokio::test]
    async fn test_gallery_redirects_to_image() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new()
            .with_json(
                "https://api.imgur.com/3/gallery/One",
                json!({ "data": { "is_album": false } }),
            )
            .with_json(
                "https://api.imgur.com/3/image/One",
                json!({ "data": { "link": "https://i.imgur.com/One.jpg" } }),
            )
            .with_file("https://i.imgur.com/One.jpg", b"jpg");

        let outcome = strategy()
            .fetch(&http, "https://imgur.com/gallery/One", dir.path())
            .await
            .unwrap();

        assert_eq!(
            outcome.into_artifact().unwrap().source_url,
            "https://i.imgur.com/One.jpg"
        );
    }

    #[tokio::test]
    async fn test_metadata_failure_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let http = FakeFetch::new();

        let err = strategy()
            .fetch(&http, "https://imgur.com/Missing", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { status: 404, .. }));
    }
}
