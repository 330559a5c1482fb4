//! Filename derivation from source URLs.

use std::path::Path;

use url::Url;

use crate::error::{Error, Result};

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Non-empty path segments of a URL, percent-decoded.
pub fn path_segments(url: &str) -> Result<Vec<String>> {
    let parsed = Url::parse(url)?;
    let segments = parsed
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(|s| {
                    urlencoding::decode(s)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| s.to_string())
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(segments)
}

/// Last path segment of a URL, e.g. `abc.jpg` for `https://i.imgur.com/abc.jpg`.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let segments = path_segments(url)?;
    let name = segments
        .last()
        .ok_or_else(|| Error::InvalidFilename(format!("No file name in URL: {}", url)))?;
    sanitize_filename(name)
}

/// Last path segment without its extension, e.g. `abc` for `https://imgur.com/a/abc`.
pub fn file_stem_from_url(url: &str) -> Result<String> {
    let name = file_name_from_url(url)?;
    let stem = Path::new(&name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&name)
        .to_string();
    sanitize_filename(&stem)
}

/// Lowercased extension (with leading dot) of the URL's last path segment.
pub fn extension_from_url(url: &str) -> Result<Option<String>> {
    let name = file_name_from_url(url)?;
    Ok(Path::new(&name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase())))
}

/// Replace (or add) the extension of a file name.
pub fn with_extension(name: &str, extension: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    format!("{}.{}", stem, extension.trim_start_matches('.'))
}
