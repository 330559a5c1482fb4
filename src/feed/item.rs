//! Feed item representation.

/// One submission from the monitored subreddit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Reddit base36 id, unique within the feed.
    pub id: String,

    pub title: String,

    /// Short link back to the submission.
    pub permalink: String,

    /// Link target (the submission itself for self posts).
    pub url: String,

    /// Marked NSFW.
    pub adult: bool,

    /// Text-only post.
    pub self_post: bool,

    pub spoiler: bool,

    /// Stickied by moderators.
    pub pinned: bool,
}

impl ContentItem {
    /// A plain link item with every flag cleared.
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            permalink: shortlink(&id),
            id,
            title: title.into(),
            url: url.into(),
            adult: false,
            self_post: false,
            spoiler: false,
            pinned: false,
        }
    }
}

/// Canonical short link for a submission id.
pub fn shortlink(id: &str) -> String {
    format!("https://redd.it/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_shortlink() {
        let item = ContentItem::new("abc123", "Title", "https://i.redd.it/abc123");
        assert_eq!(item.permalink, "https://redd.it/abc123");
        assert!(!item.adult && !item.self_post && !item.spoiler && !item.pinned);
    }
}
