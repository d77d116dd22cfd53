//! Normalization of feed-bridge items.
//!
//! The bridge relays a third-party RSS feed, so items are loosely shaped:
//! thumbnails are often missing and descriptions are HTML.

use std::sync::LazyLock;

use regex::Regex;

use crate::dates;
use crate::models::{FeedItem, RawFeedItem};

/// Maximum number of feed items shown.
pub const FEED_LIMIT: usize = 6;

/// Character budget of a feed item's plain-text description.
pub const DESCRIPTION_BUDGET: usize = 150;

const ELLIPSIS: &str = "...";

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src\s*=\s*["']([^"'>]+)["']"#).expect("img src pattern is valid")
});

pub(crate) fn normalize_item(raw: RawFeedItem) -> FeedItem {
    let thumbnail = raw
        .thumbnail
        .as_deref()
        .map(str::trim)
        .filter(|thumb| !thumb.is_empty())
        .map(str::to_string)
        .or_else(|| first_image_src(&raw.description))
        .or_else(|| first_image_src(&raw.content))
        .filter(|thumb| alalfy_render::is_safe_url(thumb));

    let published_at = dates::parse_feed_date(&raw.pub_date);

    FeedItem {
        title: raw.title.trim().to_string(),
        link: safe_link(&raw.link),
        published: raw.pub_date,
        published_at,
        description: summarize(&raw.description, DESCRIPTION_BUDGET),
        thumbnail,
    }
}

/// The bridge relays third-party links; anything that is not a safe URL is blanked.
fn safe_link(link: &str) -> String {
    let link = link.trim();
    if alalfy_render::is_safe_url(link) {
        link.to_string()
    } else {
        String::new()
    }
}

/// `src` of the first `<img>` in `html`.
pub fn first_image_src(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|src| src.as_str().trim().to_string())
        .filter(|src| !src.is_empty())
}

/// Plain text of `html`, whitespace collapsed, cut to `budget` characters.
pub fn summarize(html: &str, budget: usize) -> String {
    truncate(&alalfy_render::to_plain_text(html), budget)
}

fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(budget).collect();
    let trimmed_len = cut.trim_end().len();
    cut.truncate(trimmed_len);
    cut.push_str(ELLIPSIS);
    cut
}
