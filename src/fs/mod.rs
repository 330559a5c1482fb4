//! Filesystem module.
//!
//! Provides:
//! - Media directory management
//! - Filename derivation from URLs

pub mod naming;
pub mod paths;

pub use naming::{
    extension_from_url, file_name_from_url, file_stem_from_url, path_segments, sanitize_filename,
    with_extension,
};
pub use paths::{ensure_dir, remove_media};
