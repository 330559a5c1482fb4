//! Reddit hot-listing client (application-only OAuth).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::RedditConfig;
use crate::error::{Error, Result};
use crate::feed::item::{shortlink, ContentItem};
use crate::feed::FeedSource;
use crate::http::{build_client, REQUEST_TIMEOUT};

/// Token endpoint for application-only OAuth.
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// OAuth API base URL.
const API_BASE: &str = "https://oauth.reddit.com";

/// Refresh tokens this long before Reddit says they expire.
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expiry")]
    expires_in: u64,
}

fn default_expiry() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Submission,
}

/// The subset of a submission we care about.
#[derive(Debug, Deserialize)]
struct Submission {
    id: String,
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    over_18: bool,
    #[serde(default)]
    is_self: bool,
    #[serde(default)]
    spoiler: bool,
    #[serde(default)]
    stickied: bool,
}

impl From<Submission> for ContentItem {
    fn from(s: Submission) -> Self {
        // Self posts link to their own comments page
        let url = if s.url.is_empty() {
            format!("https://www.reddit.com{}", s.permalink)
        } else {
            s.url
        };

        ContentItem {
            permalink: shortlink(&s.id),
            id: s.id,
            title: s.title,
            url,
            adult: s.over_18,
            self_post: s.is_self,
            spoiler: s.spoiler,
            pinned: s.stickied,
        }
    }
}

/// Reads the hot listing of one subreddit.
pub struct RedditFeed {
    client: Client,
    credentials: RedditConfig,
    subreddit: String,
    token_url: String,
    api_base: String,
    token: RwLock<Option<(String, Instant)>>,
}

impl RedditFeed {
    pub fn new(credentials: RedditConfig, subreddit: String) -> Result<Self> {
        let client = build_client(Some(&credentials.user_agent), REQUEST_TIMEOUT)?;

        Ok(Self {
            client,
            credentials,
            subreddit,
            token_url: TOKEN_URL.to_string(),
            api_base: API_BASE.to_string(),
            token: RwLock::new(None),
        })
    }

    #[cfg(test)]
    fn with_endpoints(mut self, token_url: String, api_base: String) -> Self {
        self.token_url = token_url;
        self.api_base = api_base;
        self
    }

    /// Obtain a token up front so bad credentials show up before the first cycle.
    pub async fn authenticate(&self) -> Result<()> {
        self.access_token().await.map(|_| ())
    }

    /// Return a valid bearer token, requesting a new one when needed.
    async fn access_token(&self) -> Result<String> {
        if let Some((token, expires_at)) = self.token.read().await.as_ref() {
            if Instant::now() < *expires_at {
                return Ok(token.clone());
            }
        }

        tracing::info!("Setting up connection with Reddit...");
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Fetch {
                status: status.as_u16(),
                url: self.token_url.clone(),
            });
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_MARGIN);
        *self.token.write().await = Some((token.access_token.clone(), Instant::now() + lifetime));

        Ok(token.access_token)
    }
}

#[async_trait]
impl FeedSource for RedditFeed {
    async fn fetch(&self, limit: u32) -> Result<Vec<ContentItem>> {
        let token = self.access_token().await?;
        let url = format!("{}/r/{}/hot", self.api_base, self.subreddit);

        tracing::info!("Getting posts from Reddit...");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Force a new token next cycle
            *self.token.write().await = None;
        }
        if status != StatusCode::OK {
            return Err(Error::Fetch {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        parse_listing(&text)
    }
}

/// Parse a listing document into items, in feed order.
fn parse_listing(text: &str) -> Result<Vec<ContentItem>> {
    let listing: Listing = serde_json::from_str(text)
        .map_err(|e| Error::Api(format!("Failed to parse Reddit listing: {}", e)))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .map(|thing| ContentItem::from(thing.data))
        .collect())
}
