//! Media directory management.

use std::path::Path;

use crate::error::Result;

/// Ensure a directory exists, creating it (and its parents) if necessary.
///
/// Returns `true` when the directory had to be created.
pub async fn ensure_dir(path: &Path) -> Result<bool> {
    if tokio::fs::metadata(path).await.is_ok() {
        return Ok(false);
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(true)
}

/// Delete a media file once it is no longer needed.
///
/// Failures are logged and swallowed; a leftover file is harmless.
pub async fn remove_media(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::info!("Deleted media file at {}", path.display()),
        Err(e) => tracing::warn!("Failed to delete media file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let media = root.path().join("nested").join("media");

        assert!(ensure_dir(&media).await.unwrap());
        assert!(media.is_dir());
        assert!(!ensure_dir(&media).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_media() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("abc.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        remove_media(&file).await;
        assert!(!file.exists());

        // Second removal fails quietly.
        remove_media(&file).await;
    }
}
