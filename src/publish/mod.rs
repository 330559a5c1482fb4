//! Publish module: caption formatting and the outbound post target.

pub mod caption;
pub mod oauth;
pub mod twitter;

use async_trait::async_trait;

use crate::error::Result;
use crate::media::MediaArtifact;

pub use caption::{caption, MAX_CAPTION_LEN};
pub use oauth::OAuthCredentials;
pub use twitter::TwitterPublisher;

/// A published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    pub id: String,
}

impl PostReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Public URL of the post, stored as the success outcome.
    pub fn url(&self) -> String {
        format!("https://twitter.com/i/web/status/{}/", self.id)
    }
}

/// Creates outbound posts.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Post `caption`, uploading `media` first when present.
    async fn publish(&self, caption: &str, media: Option<&MediaArtifact>) -> Result<PostReference>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Publisher that records calls instead of posting.

    use std::path::PathBuf;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{PostReference, Publisher};
    use crate::error::{Error, Result};
    use crate::media::MediaArtifact;

    #[derive(Debug, Default)]
    pub struct RecordingPublisher {
        fail_upload: bool,
        pub calls: Mutex<Vec<(String, Option<PathBuf>)>>,
    }

    impl RecordingPublisher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_upload() -> Self {
            Self {
                fail_upload: true,
                ..Self::default()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn publish(
            &self,
            caption: &str,
            media: Option<&MediaArtifact>,
        ) -> Result<PostReference> {
            self.calls
                .lock()
                .unwrap()
                .push((caption.to_string(), media.map(|m| m.path.clone())));
            if self.fail_upload && media.is_some() {
                return Err(Error::Upload("media type unrecognized".to_string()));
            }
            Ok(PostReference::new("1445880548472328192"))
        }
    }
}
