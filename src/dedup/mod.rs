//! Deduplication module.
//!
//! Provides:
//! - The durable store of processed submission ids
//! - MD5 content hashing used to spot placeholder media

pub mod hash;
pub mod store;

pub use hash::{hash_bytes, hash_md5};
pub use store::{DedupStore, RedisStore};
