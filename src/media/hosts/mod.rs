//! Host-specific media strategies.
//!
//! Each supported host family gets one [`HostStrategy`]. The resolver walks
//! [`default_strategies`] in order and uses the first one whose `matches`
//! returns true, so the generic fallback must stay last.

pub mod generic;
pub mod gfycat;
pub mod giphy;
pub mod imgur;
pub mod reddit;

use std::path::Path;

use async_trait::async_trait;

use crate::config::ImgurConfig;
use crate::error::Result;
use crate::http::Fetch;
use crate::media::item::MediaOutcome;

pub use generic::GenericStrategy;
pub use gfycat::GfycatStrategy;
pub use giphy::GiphyStrategy;
pub use imgur::ImgurStrategy;
pub use reddit::RedditStrategy;

/// A way of turning a URL on one host family into a local file.
#[async_trait]
pub trait HostStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy handles `url`. Substring based, not a full parse.
    fn matches(&self, url: &str) -> bool;

    /// Fetch the media behind `url` into `media_dir`.
    async fn fetch(&self, http: &dyn Fetch, url: &str, media_dir: &Path) -> Result<MediaOutcome>;
}

/// The fixed dispatch order: Reddit, Imgur, Gfycat, Giphy, then generic.
pub fn default_strategies(imgur: &ImgurConfig) -> Vec<Box<dyn HostStrategy>> {
    vec![
        Box::new(RedditStrategy),
        Box::new(ImgurStrategy::new(
            imgur.client_id.clone(),
            imgur.client_secret.clone(),
        )),
        Box::new(GfycatStrategy),
        Box::new(GiphyStrategy::new()),
        Box::new(GenericStrategy),
    ]
}

/// Pull a string field out of a JSON document by pointer, or fail with an API error.
pub(crate) fn json_str<'a>(
    body: &'a serde_json::Value,
    pointer: &str,
    source: &str,
) -> Result<&'a str> {
    body.pointer(pointer).and_then(|v| v.as_str()).ok_or_else(|| {
        crate::error::Error::Api(format!("Missing '{}' in response from {}", pointer, source))
    })
}
