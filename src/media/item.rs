//! Resolved media representation.

use std::path::{Path, PathBuf};

/// A media file downloaded for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaArtifact {
    /// Where the file was written.
    pub path: PathBuf,

    /// URL the bytes were fetched from.
    pub source_url: String,
}

impl MediaArtifact {
    pub fn new(path: PathBuf, source_url: impl Into<String>) -> Self {
        Self {
            path,
            source_url: source_url.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Result of resolving a submission URL to media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    /// The media was saved locally.
    Downloaded(MediaArtifact),

    /// The URL does not point at media (e.g. an article or a self post).
    NotMedia,

    /// The host answered with a placeholder or an empty container.
    Unresolvable,
}

impl MediaOutcome {
    /// The downloaded artifact, if any.
    pub fn into_artifact(self) -> Option<MediaArtifact> {
        match self {
            MediaOutcome::Downloaded(artifact) => Some(artifact),
            MediaOutcome::NotMedia | MediaOutcome::Unresolvable => None,
        }
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self, MediaOutcome::Downloaded(_))
    }
}
