//! Durable record of processed submissions.

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;

use crate::config::RedisConfig;
use crate::error::Result;

/// Key holding the time a record was written.
pub fn timestamp_key(id: &str) -> String {
    format!("{}:timestamp", id)
}

/// Both keys of a record, written in one MULTI/EXEC transaction.
fn record_pipeline(id: &str, outcome: &str, timestamp: &str) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .set(id, outcome)
        .ignore()
        .set(timestamp_key(id), timestamp)
        .ignore();
    pipe
}

/// Marks submissions as processed so they are never posted twice.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Whether a record exists for `id`.
    async fn seen(&self, id: &str) -> Result<bool>;

    /// Write (or overwrite) the outcome for `id` together with the current time.
    async fn record(&self, id: &str, outcome: &str) -> Result<()>;
}

/// Redis-backed dedup store.
pub struct RedisStore {
    client: redis::Client,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("addr", &self.client.get_connection_info().addr)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Create a store for the configured server. No connection is made yet.
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url())?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    /// Check that the server answers.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// The outcome stored for `id`, if any.
    pub async fn outcome(&self, id: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        Ok(conn.get(id).await?)
    }
}

#[async_trait]
impl DedupStore for RedisStore {
    async fn seen(&self, id: &str) -> Result<bool> {
        Ok(self
            .outcome(id)
            .await?
            .map(|value| !value.is_empty())
            .unwrap_or(false))
    }

    async fn record(&self, id: &str, outcome: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let pipe = record_pipeline(id, outcome, &Utc::now().to_rfc3339());
        let _: () = pipe.query_async(&mut conn).await?;
        tracing::debug!("Recorded {} as '{}'", id, outcome);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryStore;
    use super::*;

    #[test]
    fn test_timestamp_key() {
        assert_eq!(timestamp_key("abc123"), "abc123:timestamp");
    }

    #[test]
    fn test_redis_store_accepts_config() {
        let store = RedisStore::new(&RedisConfig::default()).unwrap();
        assert!(format!("{:?}", store).contains("RedisStore"));
    }

    #[tokio::test]
    async fn test_record_then_seen() {
        let store = MemoryStore::new();
        assert!(!store.seen("abc").await.unwrap());

        store.record("abc", "https://twitter.com/i/web/status/1/").await.unwrap();

        assert!(store.seen("abc").await.unwrap());
        assert!(store.get(&timestamp_key("abc")).is_some());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.record("abc", "first").await.unwrap();
        store.record("abc", "second").await.unwrap();
        assert_eq!(store.get("abc").as_deref(), Some("second"));
    }

    #[test]
    fn test_record_writes_both_keys_in_one_transaction() {
        let packed = record_pipeline("abc", "posted", "2026-01-01T00:00:00+00:00")
            .get_packed_pipeline();
        let text = String::from_utf8(packed).unwrap();

        let multi = text.find("MULTI").unwrap();
        let outcome = text.find("posted").unwrap();
        let stamp = text.find("abc:timestamp").unwrap();
        let exec = text.find("EXEC").unwrap();
        assert!(multi < outcome && outcome < stamp && stamp < exec);
        assert_eq!(text.matches("SET").count(), 2);
    }
}
