//! One poll → select → resolve → publish → record pass.

use std::sync::Arc;

use crate::config::Config;
use crate::dedup::DedupStore;
use crate::error::{Error, Result};
use crate::feed::{ContentItem, EligibleItems, Poller};
use crate::fs::paths::remove_media;
use crate::media::{MediaArtifact, MediaOutcome, MediaResolver};
use crate::publish::{caption, Publisher};

/// Outcome stored when media-only mode suppresses a post.
pub const SKIPPED_OUTCOME: &str =
    "Twitter: Skipped because non-media posts are disabled or the media file was not found";

/// What a cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    /// Every eligible item was already processed.
    NoCandidates,

    /// One item was processed and its outcome stored.
    Recorded { id: String, outcome: String },
}

/// Ties the feed, resolver, publisher and dedup store together.
pub struct Bot {
    poller: Poller,
    store: Arc<dyn DedupStore>,
    resolver: MediaResolver,
    publisher: Arc<dyn Publisher>,
    hashtags: String,
    media_posts_only: bool,
}

impl Bot {
    pub fn new(
        poller: Poller,
        store: Arc<dyn DedupStore>,
        resolver: MediaResolver,
        publisher: Arc<dyn Publisher>,
        config: &Config,
    ) -> Self {
        Self {
            poller,
            store,
            resolver,
            publisher,
            hashtags: config.hashtag_string(),
            media_posts_only: config.media.media_posts_only,
        }
    }

    /// Run a single cycle.
    ///
    /// Feed and store failures are returned; everything that happens to the
    /// selected item after selection ends in a stored outcome.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let eligible = self.poller.fetch().await?;

        let Some(item) = self.select(eligible).await? else {
            tracing::info!("No new posts to process");
            return Ok(CycleReport::NoCandidates);
        };

        tracing::info!("Processing {} ({})", item.id, item.url);
        let outcome = self.process(&item).await;

        self.store.record(&item.id, &outcome).await?;
        tracing::info!("Recorded {}: {}", item.id, outcome);

        Ok(CycleReport::Recorded {
            id: item.id,
            outcome,
        })
    }

    /// First eligible item, in feed order, with no dedup record.
    async fn select(&self, eligible: EligibleItems) -> Result<Option<ContentItem>> {
        for item in eligible {
            if self.store.seen(&item.id).await? {
                tracing::debug!("Skipping {} because it was already processed", item.id);
                continue;
            }
            return Ok(Some(item));
        }
        Ok(None)
    }

    /// Resolve, apply media-only policy, and publish. Returns the outcome to store.
    async fn process(&self, item: &ContentItem) -> String {
        let media = match self.resolver.resolve(&item.url).await {
            Ok(MediaOutcome::Downloaded(artifact)) => Some(artifact),
            Ok(MediaOutcome::NotMedia) => None,
            Ok(MediaOutcome::Unresolvable) => {
                tracing::warn!("Media for {} is unavailable", item.id);
                None
            }
            Err(e) => {
                tracing::error!("Error while resolving media for {}: {}", item.id, e);
                return failure("Error while resolving media", &e);
            }
        };

        if self.media_posts_only && media.is_none() {
            tracing::warn!(
                "Twitter: Skipping {} because non-media posts are disabled or the media file was not found",
                item.id
            );
            return SKIPPED_OUTCOME.to_string();
        }

        self.publish(item, media.as_ref()).await
    }

    async fn publish(&self, item: &ContentItem, media: Option<&MediaArtifact>) -> String {
        let text = caption(item, &self.hashtags);

        match self.publisher.publish(&text, media).await {
            Ok(post) => {
                if let Some(artifact) = media {
                    remove_media(artifact.path()).await;
                }
                let url = post.url();
                tracing::info!("Published {} as {}", item.id, url);
                url
            }
            Err(e) => {
                tracing::error!("Error while posting tweet for {}: {}", item.id, e);
                failure("Error while posting tweet", &e)
            }
        }
    }
}

/// Human-readable failure outcome.
fn failure(context: &str, error: &Error) -> String {
    format!("{}: {}: {}", context, error.kind(), error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImgurConfig;
    use crate::dedup::store::testing::MemoryStore;
    use crate::feed::testing::StaticFeed;
    use crate::feed::FeedPolicy;
    use crate::http::testing::FakeFetch;
    use crate::media::default_strategies;
    use crate::publish::testing::RecordingPublisher;
    use std::path::Path;

    const POSTED: &str = "https://twitter.com/i/web/status/1445880548472328192/";

    struct Harness {
        store: Arc<MemoryStore>,
        publisher: Arc<RecordingPublisher>,
        bot: Bot,
    }

    fn harness(
        items: Vec<ContentItem>,
        http: FakeFetch,
        store: MemoryStore,
        publisher: RecordingPublisher,
        config: Config,
        media_dir: &Path,
    ) -> Harness {
        let store = Arc::new(store);
        let publisher = Arc::new(publisher);
        let poller = Poller::new(
            Arc::new(StaticFeed::new(items)),
            FeedPolicy::from_config(&config.general),
            config.general.post_limit,
        );
        let resolver = MediaResolver::with_strategies(
            Arc::new(http),
            media_dir.to_path_buf(),
            default_strategies(&ImgurConfig {
                client_id: "client".into(),
                client_secret: "secret".into(),
            }),
        );
        let bot = Bot::new(poller, store.clone(), resolver, publisher.clone(), &config);
        Harness {
            store,
            publisher,
            bot,
        }
    }

    fn empty_album() -> (ContentItem, FakeFetch) {
        let item = ContentItem::new("al1", "Album", "https://imgur.com/a/Empty");
        let http = FakeFetch::new().with_json(
            "https://api.imgur.com/3/album/Empty",
            serde_json::json!({ "data": { "images": [] } }),
        );
        (item, http)
    }

    fn image_item(id: &str) -> ContentItem {
        ContentItem::new(id, "Sunset over the bay", format!("https://i.redd.it/{}.jpg", id))
    }

    #[tokio::test]
    async fn test_ineligible_self_post_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut post = ContentItem::new("s1", "Question", "https://www.reddit.com/r/x/comments/s1/");
        post.self_post = true;
        let mut config = Config::default();
        config.general.self_posts_allowed = false;

        let h = harness(
            vec![post],
            FakeFetch::new(),
            MemoryStore::new(),
            RecordingPublisher::new(),
            config,
            dir.path(),
        );

        let report = h.bot.run_cycle().await.unwrap();

        assert_eq!(report, CycleReport::NoCandidates);
        assert_eq!(h.publisher.call_count(), 0);
        assert_eq!(*h.store.writes.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_publishes_first_unseen_item_with_media() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.general.hashtags = vec!["pics".into()];

        let h = harness(
            vec![image_item("old"), image_item("new"), image_item("newer")],
            FakeFetch::new().with_file("https://i.redd.it/new.jpg", b"jpeg"),
            MemoryStore::new().with_record("old", POSTED),
            RecordingPublisher::new(),
            config,
            dir.path(),
        );

        let report = h.bot.run_cycle().await.unwrap();

        assert_eq!(
            report,
            CycleReport::Recorded {
                id: "new".into(),
                outcome: POSTED.into()
            }
        );
        assert_eq!(h.store.get("new").as_deref(), Some(POSTED));
        assert!(h.store.get("newer").is_none());

        let calls = h.publisher.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Sunset over the bay #pics https://redd.it/new");
        assert_eq!(calls[0].1.as_deref(), Some(dir.path().join("new.jpg").as_path()));

        // Published media is cleaned up
        assert!(!dir.path().join("new.jpg").exists());
    }

    #[tokio::test]
    async fn test_text_only_post_when_not_media() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://blog.example.com/article";
        let h = harness(
            vec![ContentItem::new("a1", "Article", url)],
            FakeFetch::new().with_content_type(url, "text/html; charset=utf-8"),
            MemoryStore::new(),
            RecordingPublisher::new(),
            Config::default(),
            dir.path(),
        );

        h.bot.run_cycle().await.unwrap();

        let calls = h.publisher.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![("Article https://redd.it/a1".to_string(), None)]);
        assert_eq!(h.store.get("a1").as_deref(), Some(POSTED));
    }

    #[tokio::test]
    async fn test_media_only_mode_records_skip() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://blog.example.com/article";
        let mut config = Config::default();
        config.media.media_posts_only = true;

        let h = harness(
            vec![ContentItem::new("a1", "Article", url)],
            FakeFetch::new().with_content_type(url, "text/html"),
            MemoryStore::new(),
            RecordingPublisher::new(),
            config,
            dir.path(),
        );

        let report = h.bot.run_cycle().await.unwrap();

        assert_eq!(
            report,
            CycleReport::Recorded {
                id: "a1".into(),
                outcome: SKIPPED_OUTCOME.into()
            }
        );
        assert_eq!(h.publisher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_is_recorded_and_file_kept() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(
            vec![image_item("img")],
            FakeFetch::new().with_file("https://i.redd.it/img.jpg", b"jpeg"),
            MemoryStore::new(),
            RecordingPublisher::failing_upload(),
            Config::default(),
            dir.path(),
        );

        let report = h.bot.run_cycle().await.unwrap();

        let CycleReport::Recorded { id, outcome } = report else {
            panic!("expected a recorded outcome");
        };
        assert_eq!(id, "img");
        assert!(outcome.starts_with("Error while posting tweet: UploadError: "));
        assert!(dir.path().join("img.jpg").exists());
    }

    #[tokio::test]
    async fn test_resolve_failure_is_recorded_without_publishing() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(
            vec![ContentItem::new("g1", "Gif", "https://gfycat.com/GoneForever")],
            FakeFetch::new(),
            MemoryStore::new(),
            RecordingPublisher::new(),
            Config::default(),
            dir.path(),
        );

        let report = h.bot.run_cycle().await.unwrap();

        let CycleReport::Recorded { outcome, .. } = report else {
            panic!("expected a recorded outcome");
        };
        assert!(outcome.starts_with("Error while resolving media: FetchError: "));
        assert_eq!(h.publisher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_store_outage_leaves_item_unseen() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(
            vec![image_item("img")],
            FakeFetch::new().with_file("https://i.redd.it/img.jpg", b"jpeg"),
            MemoryStore::new(),
            RecordingPublisher::new(),
            Config::default(),
            dir.path(),
        );

        h.store.set_read_only(true);
        let err = h.bot.run_cycle().await.unwrap_err();
        assert_eq!(err.kind(), "StoreUnavailable");
        assert!(h.store.get("img").is_none());

        // The next cycle picks the same item again
        h.store.set_read_only(false);
        let report = h.bot.run_cycle().await.unwrap();
        assert!(matches!(report, CycleReport::Recorded { ref id, .. } if id == "img"));
        assert_eq!(h.publisher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_store_unreachable_before_selection() {
        let dir = tempfile::tempdir().unwrap();
        let h = harness(
            vec![image_item("img")],
            FakeFetch::new(),
            MemoryStore::new(),
            RecordingPublisher::new(),
            Config::default(),
            dir.path(),
        );

        h.store.set_unavailable(true);
        assert!(h.bot.run_cycle().await.is_err());
        assert_eq!(h.publisher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_feed_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let config = Config::default();
        let bot = Bot::new(
            Poller::new(Arc::new(StaticFeed::failing()), FeedPolicy::default(), 10),
            store.clone(),
            MediaResolver::with_strategies(
                Arc::new(FakeFetch::new()),
                dir.path().to_path_buf(),
                Vec::new(),
            ),
            Arc::new(RecordingPublisher::new()),
            &config,
        );

        let err = bot.run_cycle().await.unwrap_err();
        assert_eq!(err.kind(), "FetchError");
        assert_eq!(*store.writes.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_media_posts_text_only() {
        let dir = tempfile::tempdir().unwrap();
        let (item, http) = empty_album();
        let h = harness(
            vec![item],
            http,
            MemoryStore::new(),
            RecordingPublisher::new(),
            Config::default(),
            dir.path(),
        );

        h.bot.run_cycle().await.unwrap();

        let calls = h.publisher.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![("Album https://redd.it/al1".to_string(), None)]);
        assert_eq!(h.store.get("al1").as_deref(), Some(POSTED));
    }

    #[tokio::test]
    async fn test_unresolvable_media_skipped_in_media_only_mode() {
        let dir = tempfile::tempdir().unwrap();
        let (item, http) = empty_album();
        let mut config = Config::default();
        config.media.media_posts_only = true;
        let h = harness(
            vec![item],
            http,
            MemoryStore::new(),
            RecordingPublisher::new(),
            config,
            dir.path(),
        );

        let report = h.bot.run_cycle().await.unwrap();

        assert_eq!(
            report,
            CycleReport::Recorded {
                id: "al1".into(),
                outcome: SKIPPED_OUTCOME.into()
            }
        );
        assert_eq!(h.publisher.call_count(), 0);
        assert_eq!(h.store.get("al1").as_deref(), Some(SKIPPED_OUTCOME));
    }
}
