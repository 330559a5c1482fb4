//! Eligibility filtering of feed items.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::GeneralConfig;
use crate::error::Result;
use crate::feed::item::ContentItem;
use crate::feed::FeedSource;

/// Which kinds of submission may be reposted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPolicy {
    pub nsfw_allowed: bool,
    pub self_posts_allowed: bool,
    pub spoilers_allowed: bool,
}

impl FeedPolicy {
    pub fn from_config(general: &GeneralConfig) -> Self {
        Self {
            nsfw_allowed: general.nsfw_posts_allowed,
            self_posts_allowed: general.self_posts_allowed,
            spoilers_allowed: general.spoilers_allowed,
        }
    }

    /// Why `item` is excluded, or `None` if it is eligible.
    ///
    /// Checks run in a fixed order and the first hit wins. Pinned items are
    /// always excluded.
    pub fn exclusion(&self, item: &ContentItem) -> Option<&'static str> {
        if item.adult && !self.nsfw_allowed {
            Some("it is marked as NSFW")
        } else if item.self_post && !self.self_posts_allowed {
            Some("it is a self post")
        } else if item.spoiler && !self.spoilers_allowed {
            Some("it is marked as a spoiler")
        } else if item.pinned {
            Some("it is stickied")
        } else {
            None
        }
    }
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self::from_config(&GeneralConfig::default())
    }
}

/// Eligible items for one cycle, keyed by id, in feed order.
#[derive(Debug, Default, Clone)]
pub struct EligibleItems {
    items: Vec<ContentItem>,
    ids: HashSet<String>,
}

impl EligibleItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item unless its id is already present. Returns whether it was added.
    pub fn insert(&mut self, item: ContentItem) -> bool {
        if !self.ids.insert(item.id.clone()) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }
}

impl IntoIterator for EligibleItems {
    type Item = ContentItem;
    type IntoIter = std::vec::IntoIter<ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Apply `policy` to a batch of items, logging every exclusion.
pub fn filter_items(items: Vec<ContentItem>, policy: &FeedPolicy) -> EligibleItems {
    let mut eligible = EligibleItems::new();

    for item in items {
        if let Some(reason) = policy.exclusion(&item) {
            tracing::info!("Skipping {} because {}", item.id, reason);
            continue;
        }
        if !eligible.insert(item) {
            tracing::debug!("Dropping duplicate item in feed batch");
        }
    }

    eligible
}

/// Fetches a batch from a feed source and keeps the eligible items.
pub struct Poller {
    source: Arc<dyn FeedSource>,
    policy: FeedPolicy,
    limit: u32,
}

impl Poller {
    pub fn new(source: Arc<dyn FeedSource>, policy: FeedPolicy, limit: u32) -> Self {
        Self {
            source,
            policy,
            limit,
        }
    }

    pub async fn fetch(&self) -> Result<EligibleItems> {
        let items = self.source.fetch(self.limit).await?;
        let fetched = items.len();
        let eligible = filter_items(items, &self.policy);

        tracing::debug!("{} of {} fetched items are eligible", eligible.len(), fetched);
        Ok(eligible)
    }
}
