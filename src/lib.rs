//! tootbot - repost subreddit submissions to Twitter
//!
//! This library provides the pieces of a daemon that, once per cycle, reads a
//! subreddit's hot listing, picks the first eligible post it has not handled
//! before, downloads any attached media and publishes the post to Twitter.
//!
//! # Features
//!
//! - NSFW, spoiler, self-post and stickied filtering
//! - Media from Reddit, Imgur (images, albums, galleries), Gfycat, Giphy and
//!   any direct image link
//! - Placeholder detection for removed Giphy media
//! - Media-only mode
//! - Redis-backed deduplication: every handled post is recorded exactly once
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tootbot::{
//!     Bot, Config, FeedPolicy, HttpClient, MediaResolver, Poller, RedditFeed, RedisStore,
//!     TwitterPublisher,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("settings.toml"))?;
//!     let feed = RedditFeed::new(
//!         config.reddit.clone(),
//!         config.general.subreddit_to_monitor.clone(),
//!     )?;
//!     let poller = Poller::new(
//!         Arc::new(feed),
//!         FeedPolicy::from_config(&config.general),
//!         config.general.post_limit,
//!     );
//!     let http = Arc::new(HttpClient::new(&config.reddit.user_agent)?);
//!     let bot = Bot::new(
//!         poller,
//!         Arc::new(RedisStore::new(&config.redis)?),
//!         MediaResolver::new(http, &config),
//!         Arc::new(TwitterPublisher::new(&config.twitter)?),
//!         &config,
//!     );
//!
//!     let report = bot.run_cycle().await?;
//!     println!("{:?}", report);
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod feed;
pub mod fs;
pub mod http;
pub mod media;
pub mod output;
pub mod publish;

// Re-exports for convenience
pub use bot::{run_forever, shutdown_signal, Bot, CycleReport};
pub use config::Config;
pub use dedup::{DedupStore, RedisStore};
pub use error::{Error, Result};
pub use feed::{ContentItem, EligibleItems, FeedPolicy, FeedSource, Poller, RedditFeed};
pub use http::{Fetch, HttpClient};
pub use media::{MediaArtifact, MediaOutcome, MediaResolver};
pub use publish::{caption, PostReference, Publisher, TwitterPublisher};
