//! Twitter publisher: v1.1 media upload plus v2 post creation.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::{json, Value};

use crate::config::TwitterConfig;
use crate::error::{Error, Result};
use crate::http::{build_client, REQUEST_TIMEOUT};
use crate::media::MediaArtifact;
use crate::publish::oauth::OAuthCredentials;
use crate::publish::{PostReference, Publisher};

const UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
const TWEETS_URL: &str = "https://api.twitter.com/2/tweets";

/// Publishes captions (and optional media) to a Twitter account.
pub struct TwitterPublisher {
    client: Client,
    credentials: OAuthCredentials,
}

impl TwitterPublisher {
    pub fn new(config: &TwitterConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(None, REQUEST_TIMEOUT)?,
            credentials: OAuthCredentials::from(config),
        })
    }

    /// Upload a local file and return its media id.
    pub async fn upload_media(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("media")
            .to_string();
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        tracing::debug!("Uploading {} ({}, {} bytes)", file_name, mime, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())?;
        let form = Form::new().part("media", part);

        let response = self
            .client
            .post(UPLOAD_URL)
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.authorization("POST", UPLOAD_URL, &[]),
            )
            .multipart(form)
            .send()
            .await?;

        let body = read_success(response, UPLOAD_URL)
            .await
            .map_err(|e| Error::Upload(e.to_string()))?;
        media_id(&body)
    }

    /// Create a post, optionally attaching an uploaded media id.
    pub async fn create_post(&self, text: &str, media_id: Option<&str>) -> Result<String> {
        let mut payload = json!({ "text": text });
        if let Some(id) = media_id {
            payload["media"] = json!({ "media_ids": [id] });
        }

        let response = self
            .client
            .post(TWEETS_URL)
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.authorization("POST", TWEETS_URL, &[]),
            )
            .json(&payload)
            .send()
            .await?;

        let body = read_success(response, TWEETS_URL).await?;
        post_id(&body)
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(&self, caption: &str, media: Option<&MediaArtifact>) -> Result<PostReference> {
        let id = match media {
            Some(artifact) => {
                tracing::info!("Posting this on Twitter with media attachment: {}", caption);
                let media_id = self.upload_media(artifact.path()).await?;
                self.create_post(caption, Some(&media_id)).await?
            }
            None => {
                tracing::info!("Posting this on Twitter: {}", caption);
                self.create_post(caption, None).await?
            }
        };

        Ok(PostReference::new(id))
    }
}

/// Parse a successful JSON response, or turn the status into a publish error.
async fn read_success(response: Response, url: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Publish(format!(
            "Response code was {} from url {}: {}",
            status.as_u16(),
            url,
            body.chars().take(200).collect::<String>()
        )));
    }
    Ok(response.json().await?)
}

fn media_id(body: &Value) -> Result<String> {
    body.get("media_id_string")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Upload("Couldn't load media to Twitter".to_string()))
}

fn post_id(body: &Value) -> Result<String> {
    body.pointer("/data/id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Api("Post response has no data.id".to_string()))
}
