//! reqwest-backed fetch primitive.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::http::Fetch;

/// Connect and read inactivity timeout applied to every outbound request.
///
/// A transfer that keeps delivering bytes is never cut off; only a stall
/// longer than this fails.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response body excerpt kept in error messages.
const BODY_EXCERPT: usize = 500;

/// Build a reqwest client whose timeout bounds connecting and each read,
/// not the whole request.
pub fn build_client(user_agent: Option<&str>, timeout: Duration) -> Result<Client> {
    let mut builder = Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout);
    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent);
    }

    builder
        .build()
        .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))
}

/// HTTP client shared by every host strategy.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client with the given user agent and the fixed request timeout.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_timeout(user_agent, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(user_agent: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(Some(user_agent), timeout)?,
        })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<serde_json::Value> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        tracing::debug!("GET {}", url);
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            tracing::debug!("Body from {}: {}", url, excerpt(&text));
            return Err(Error::Fetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse response from {}: {} - Response: {}",
                url,
                e,
                excerpt(&text)
            ))
        })
    }

    async fn content_type(&self, url: &str) -> Result<Option<String>> {
        tracing::debug!("GET {} for its content type", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("Status for {}: {}", url, response.status());

        Ok(response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string()))
    }

    async fn save_file(&self, url: &str, path: &Path) -> Result<PathBuf> {
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(Error::Fetch {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let written = match stream_to_file(response, path).await {
            Ok(written) => written,
            Err(e) => {
                // Don't leave a truncated file behind
                let _ = tokio::fs::remove_file(path).await;
                return Err(e);
            }
        };
        tracing::debug!("Wrote {} bytes from {} to {}", written, url, path.display());

        Ok(path.to_path_buf())
    }
}

/// Copy a response body to `path` chunk by chunk, overwriting any existing file.
async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(BODY_EXCERPT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
