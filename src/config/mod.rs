//! Configuration module for tootbot.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Environment variable overrides
//! - CLI argument merging (see `cli`)
//! - Configuration validation

pub mod env;
pub mod loader;
pub mod validation;

pub use env::{apply_env_overrides, parse_bool};
pub use loader::{
    render_hashtags, Config, GeneralConfig, ImgurConfig, MediaConfig, RedditConfig, RedisConfig,
    TwitterConfig,
};
pub use validation::validate_config;
