//! Configuration validation logic.

use crate::config::loader::{render_hashtags, Config};
use crate::error::{Error, Result};
use regex::Regex;

/// Longest rendered hashtag block that still leaves room for a title and link.
const MAX_HASHTAG_LENGTH: usize = 200;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_subreddit(&config.general.subreddit_to_monitor)?;
    validate_post_limit(config.general.post_limit)?;
    validate_hashtags(&config.general.hashtags)?;
    validate_required("reddit.client_id", &config.reddit.client_id)?;
    validate_required("reddit.client_secret", &config.reddit.client_secret)?;
    validate_required("twitter.consumer_key", &config.twitter.consumer_key)?;
    validate_required("twitter.consumer_secret", &config.twitter.consumer_secret)?;
    validate_required("twitter.access_token", &config.twitter.access_token)?;
    validate_required(
        "twitter.access_token_secret",
        &config.twitter.access_token_secret,
    )?;
    validate_required("redis.host", &config.redis.host)?;

    Ok(())
}

/// Validate the monitored subreddit name.
pub fn validate_subreddit(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::MissingConfig(
            "general.subreddit_to_monitor (subreddit to monitor must be a non empty string)"
                .to_string(),
        ));
    }

    let pattern = Regex::new(r"^[A-Za-z0-9_]{2,21}$").unwrap();
    if !pattern.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "general.subreddit_to_monitor".to_string(),
            message: format!("'{}' is not a valid subreddit name", name),
        });
    }

    Ok(())
}

fn validate_post_limit(limit: u32) -> Result<()> {
    if limit == 0 {
        return Err(Error::ConfigValidation {
            field: "general.post_limit".to_string(),
            message: "Post limit must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Validate that the hashtag block leaves room for a title.
pub fn validate_hashtags<S: AsRef<str>>(hashtags: &[S]) -> Result<()> {
    let rendered = render_hashtags(hashtags);
    let length = rendered.chars().count();
    if length > MAX_HASHTAG_LENGTH {
        return Err(Error::ConfigValidation {
            field: "general.hashtags".to_string(),
            message: format!(
                "Hashtags take {} characters, at most {} are allowed",
                length, MAX_HASHTAG_LENGTH
            ),
        });
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder".to_string(),
        });
    }

    Ok(())
}
