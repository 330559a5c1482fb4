//! Feed module: the content source and eligibility filtering.

pub mod filter;
pub mod item;
pub mod reddit;

use async_trait::async_trait;

use crate::error::Result;

pub use filter::{filter_items, EligibleItems, FeedPolicy, Poller};
pub use item::ContentItem;
pub use reddit::RedditFeed;

/// A source of candidate items, newest-ranked first.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch at most `limit` items in feed order.
    async fn fetch(&self, limit: u32) -> Result<Vec<ContentItem>>;
}
