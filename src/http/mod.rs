//! HTTP fetch primitive.
//!
//! Every host strategy talks to the network exclusively through [`Fetch`],
//! which keeps the strategies testable without a live connection.

pub mod client;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

pub use client::{build_client, HttpClient, REQUEST_TIMEOUT};

/// Network operations needed to resolve media.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET a JSON document. Any status other than 200 is an `Error::Fetch`.
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<serde_json::Value>;

    /// GET a URL and report its `content-type` header, if any.
    async fn content_type(&self, url: &str) -> Result<Option<String>>;

    /// Stream the body of a URL into `path`, overwriting it. Any status other
    /// than 200 is an `Error::Fetch`.
    async fn save_file(&self, url: &str, path: &Path) -> Result<PathBuf>;
}
