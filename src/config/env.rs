//! Environment variable overrides for general and media settings.

use std::path::PathBuf;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Apply `TOOTBOT_GENERAL_*` / `TOOTBOT_MEDIA_*` overrides from the process environment.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides using an arbitrary variable lookup.
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(value) = get("TOOTBOT_GENERAL_SUBREDDIT_TO_MONITOR") {
        config.general.subreddit_to_monitor = value;
    }
    if let Some(value) = get("TOOTBOT_GENERAL_POST_LIMIT") {
        config.general.post_limit = parse_number("post_limit", &value)?;
    }
    if let Some(value) = get("TOOTBOT_GENERAL_DELAY_BETWEEN_POSTS") {
        config.general.delay_between_posts = parse_number("delay_between_posts", &value)?;
    }
    if let Some(value) = get("TOOTBOT_GENERAL_NSFW_POSTS_ALLOWED") {
        config.general.nsfw_posts_allowed = parse_bool("nsfw_posts_allowed", &value)?;
    }
    if let Some(value) = get("TOOTBOT_GENERAL_SPOILERS_ALLOWED") {
        config.general.spoilers_allowed = parse_bool("spoilers_allowed", &value)?;
    }
    if let Some(value) = get("TOOTBOT_GENERAL_SELF_POSTS_ALLOWED") {
        config.general.self_posts_allowed = parse_bool("self_posts_allowed", &value)?;
    }
    if let Some(value) = get("TOOTBOT_GENERAL_HASHTAGS") {
        config.general.hashtags = value
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
    }
    if let Some(value) = get("TOOTBOT_MEDIA_MEDIA_FOLDER") {
        config.media.media_folder = PathBuf::from(value);
    }
    if let Some(value) = get("TOOTBOT_MEDIA_MEDIA_POSTS_ONLY") {
        config.media.media_posts_only = parse_bool("media_posts_only", &value)?;
    }

    Ok(())
}

/// Parse a textual boolean the way shell users write them.
pub fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        other => Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Invalid boolean text '{}'", other),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("Expected a non-negative integer, got '{}'", value),
    })
}
