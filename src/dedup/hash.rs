//! Content hashing for placeholder detection.

use std::path::Path;

use md5::{Digest, Md5};
use tokio::io::AsyncReadExt;

use crate::error::Result;

/// Compute the MD5 hex digest of a file.
pub async fn hash_md5(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

/// Compute the MD5 hex digest of an in-memory buffer.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes_known_value() {
        assert_eq!(hash_bytes(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hash_bytes(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[tokio::test]
    async fn test_hash_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.gif");
        let content = vec![7u8; 20_000];
        std::fs::write(&path, &content).unwrap();

        assert_eq!(hash_md5(&path).await.unwrap(), hash_bytes(&content));
    }
}
