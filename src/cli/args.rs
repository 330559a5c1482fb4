//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// Subreddit to Twitter repost daemon.
#[derive(Parser, Debug)]
#[command(
    name = "tootbot",
    version,
    about = "Repost subreddit submissions, with their media, to Twitter",
    long_about = "A daemon that polls a subreddit's hot listing, picks the first post it has not \
                  handled yet, downloads any attached media and posts it to Twitter.\n\n\
                  Processed posts are tracked in Redis so nothing is posted twice."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "settings.toml")]
    pub config: PathBuf,

    /// Subreddit to monitor (without the r/ prefix).
    #[arg(short, long)]
    pub subreddit: Option<String>,

    /// Folder for downloaded media.
    #[arg(short, long = "media-folder")]
    pub media_folder: Option<PathBuf>,

    /// Reddit application client id.
    #[arg(long = "reddit-client-id", env = "TOOTBOT_REDDIT_CLIENT_ID")]
    pub reddit_client_id: Option<String>,

    /// Reddit application client secret.
    #[arg(long = "reddit-client-secret", env = "TOOTBOT_REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub reddit_client_secret: Option<String>,

    /// Imgur API client id.
    #[arg(long = "imgur-client-id", env = "TOOTBOT_IMGUR_CLIENT")]
    pub imgur_client_id: Option<String>,

    /// Imgur API client secret.
    #[arg(long = "imgur-client-secret", env = "TOOTBOT_IMGUR_CLIENT_SECRET", hide_env_values = true)]
    pub imgur_client_secret: Option<String>,

    /// Twitter consumer key.
    #[arg(long = "twitter-consumer-key", env = "TOOTBOT_TWITTER_CONSUMER_KEY")]
    pub twitter_consumer_key: Option<String>,

    /// Twitter consumer secret.
    #[arg(long = "twitter-consumer-secret", env = "TOOTBOT_TWITTER_CONSUMER_SECRET", hide_env_values = true)]
    pub twitter_consumer_secret: Option<String>,

    /// Twitter access token.
    #[arg(long = "twitter-access-token", env = "TOOTBOT_TWITTER_ACCESS_TOKEN", hide_env_values = true)]
    pub twitter_access_token: Option<String>,

    /// Twitter access token secret.
    #[arg(long = "twitter-access-token-secret", env = "TOOTBOT_TWITTER_ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub twitter_access_token_secret: Option<String>,

    /// Redis host.
    #[arg(long = "redis-host", env = "REDIS_HOST")]
    pub redis_host: Option<String>,

    /// Redis port.
    #[arg(long = "redis-port", env = "REDIS_PORT")]
    pub redis_port: Option<u16>,

    /// Redis password.
    #[arg(long = "redis-password", env = "REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// What to do after startup.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Poll and post until stopped (default).
    #[default]
    Run,
    /// Run a single cycle and exit.
    Once,
}

impl Args {
    /// The requested command, defaulting to `run`.
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(subreddit) = self.subreddit {
            config.general.subreddit_to_monitor = subreddit;
        }

        if let Some(folder) = self.media_folder {
            config.media.media_folder = folder;
        }

        // Credentials
        if let Some(id) = self.reddit_client_id {
            config.reddit.client_id = id;
        }
        if let Some(secret) = self.reddit_client_secret {
            config.reddit.client_secret = secret;
        }

        if let Some(id) = self.imgur_client_id {
            config.imgur.client_id = id;
        }
        if let Some(secret) = self.imgur_client_secret {
            config.imgur.client_secret = secret;
        }

        if let Some(key) = self.twitter_consumer_key {
            config.twitter.consumer_key = key;
        }
        if let Some(secret) = self.twitter_consumer_secret {
            config.twitter.consumer_secret = secret;
        }
        if let Some(token) = self.twitter_access_token {
            config.twitter.access_token = token;
        }
        if let Some(secret) = self.twitter_access_token_secret {
            config.twitter.access_token_secret = secret;
        }

        // Store
        if let Some(host) = self.redis_host {
            config.redis.host = host;
        }
        if let Some(port) = self.redis_port {
            config.redis.port = port;
        }
        if let Some(password) = self.redis_password {
            config.redis.password = Some(password);
        }
    }
}
