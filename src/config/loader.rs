//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub imgur: ImgurConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub redis: RedisConfig,
}

/// Feed and posting behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Subreddit whose hot listing is polled.
    #[serde(default)]
    pub subreddit_to_monitor: String,

    /// Maximum number of submissions fetched per cycle.
    #[serde(default = "default_post_limit")]
    pub post_limit: u32,

    /// Seconds slept between cycles.
    #[serde(default = "default_delay")]
    pub delay_between_posts: u64,

    #[serde(default)]
    pub nsfw_posts_allowed: bool,

    #[serde(default = "default_true")]
    pub spoilers_allowed: bool,

    #[serde(default = "default_true")]
    pub self_posts_allowed: bool,

    /// Hashtags appended to every caption, without the leading '#'.
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            subreddit_to_monitor: String::new(),
            post_limit: default_post_limit(),
            delay_between_posts: default_delay(),
            nsfw_posts_allowed: false,
            spoilers_allowed: true,
            self_posts_allowed: true,
            hashtags: Vec::new(),
        }
    }
}

/// Media handling options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory downloaded media is written to.
    #[serde(default = "default_media_folder")]
    pub media_folder: PathBuf,

    /// Skip submissions that have no resolvable media.
    #[serde(default)]
    pub media_posts_only: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            media_folder: default_media_folder(),
            media_posts_only: false,
        }
    }
}

/// Reddit application credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

/// Imgur API credentials. Only needed once an Imgur link shows up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImgurConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,
}

/// Twitter OAuth 1.0a user credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwitterConfig {
    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub access_token_secret: String,
}

/// Connection details for the dedup store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_host")]
    pub host: String,

    #[serde(default = "default_redis_port")]
    pub port: u16,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub db: u32,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: default_redis_host(),
            port: default_redis_port(),
            password: None,
            db: 0,
        }
    }
}

impl RedisConfig {
    /// Connection URL in the form accepted by `redis::Client::open`.
    pub fn url(&self) -> String {
        match self.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                urlencoding::encode(password),
                self.host,
                self.port,
                self.db
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

fn default_post_limit() -> u32 {
    10
}

fn default_delay() -> u64 {
    600
}

fn default_true() -> bool {
    true
}

fn default_media_folder() -> PathBuf {
    PathBuf::from("media")
}

fn default_user_agent() -> String {
    format!("rust:tootbot:v{}", env!("CARGO_PKG_VERSION"))
}

fn default_redis_host() -> String {
    "localhost".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from settings.toml.template",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Delay slept between two cycles.
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.general.delay_between_posts)
    }

    /// Hashtags rendered as they appear in a caption, e.g. `#rust #news`.
    pub fn hashtag_string(&self) -> String {
        render_hashtags(&self.general.hashtags)
    }
}

/// Render a list of hashtags, dropping empty entries.
pub fn render_hashtags<S: AsRef<str>>(hashtags: &[S]) -> String {
    hashtags
        .iter()
        .map(|tag| tag.as_ref().trim().trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}
