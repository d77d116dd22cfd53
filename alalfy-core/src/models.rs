use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Post author as embedded by the blog API.
pub struct Author {
    /// Author identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Avatar image URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Blog category.
pub struct Category {
    /// Category identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL slug, unique within one listing.
    pub slug: String,
    /// One-line description shown under the title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_description: String,
    /// Long description (author-supplied HTML).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Banner image URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub banner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Blog post with its author and category embedded.
pub struct Post {
    /// Post identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// URL slug, unique within one listing.
    pub slug: String,
    /// Teaser text.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_description: String,
    /// Body (raw author-supplied HTML).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Banner image URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub banner: String,
    /// Author.
    pub author: Author,
    /// Category the post is filed under.
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Cross-posted article from the external feed.
///
/// Feed items carry no stable identifier; listings key them by position.
pub struct FeedItem {
    /// Title.
    pub title: String,
    /// Link to the external article.
    pub link: String,
    /// Publish timestamp as sent by the feed bridge.
    pub published: String,
    /// Parsed publish timestamp, when `published` is in a known format.
    pub published_at: Option<NaiveDateTime>,
    /// Plain-text teaser, already truncated.
    pub description: String,
    /// Thumbnail image URL, either sent by the bridge or recovered from the body.
    pub thumbnail: Option<String>,
}

/// Optional text fields arrive as a missing key, `null` or a string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ "data": [...] }` wrapper used by every primary API response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: Vec<T>,
}

/// `{ "items": [...] }` wrapper returned by the feed bridge.
#[derive(Debug, Deserialize)]
pub(crate) struct FeedEnvelope {
    pub(crate) items: Vec<RawFeedItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFeedItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) link: String,
    #[serde(default, rename = "pubDate", deserialize_with = "null_as_empty")]
    pub(crate) pub_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) thumbnail: Option<String>,
}
