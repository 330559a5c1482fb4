//! Caption formatting.

use crate::feed::ContentItem;

/// Maximum caption length, in characters.
pub const MAX_CAPTION_LEN: usize = 280;

const ELLIPSIS: &str = "...";

/// Build `{title} {hashtags} {link}`, shortening only the title when needed.
///
/// `hashtags` is the pre-rendered hashtag block (may be empty). The result
/// never exceeds [`MAX_CAPTION_LEN`] characters as long as the link and
/// hashtags fit on their own.
pub fn caption(item: &ContentItem, hashtags: &str) -> String {
    let link = item.permalink.as_str();

    let mut reserved = link.chars().count() + 1;
    if !hashtags.is_empty() {
        reserved += hashtags.chars().count() + 1;
    }
    let max_title = MAX_CAPTION_LEN.saturating_sub(reserved);

    let title = shorten(&item.title, max_title);
    if hashtags.is_empty() {
        format!("{} {}", title, link)
    } else {
        format!("{} {} {}", title, hashtags, link)
    }
}

fn shorten(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    if max < ELLIPSIS.len() {
        return title.chars().take(max).collect();
    }

    let mut short: String = title.chars().take(max - ELLIPSIS.len()).collect();
    short.push_str(ELLIPSIS);
    short
}
