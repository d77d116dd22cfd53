//! Content layer of the Alalfy Dev blog frontend.
//!
//! - [`ContentApi`]: one fetch operation per API resource, over any [`Transport`]
//! - [`pages`]: what each page fetches and how it degrades
//! - [`theme`]: the persisted light/dark preference
//!
//! Post bodies are handed to `alalfy-render` before they reach a page.

mod api;
mod dates;
mod error;
mod feed;
mod models;
mod transport;

pub mod pages;
pub mod theme;

#[cfg(test)]
mod testing;

pub use api::{
    ApiConfig, ContentApi, DEFAULT_API_BASE_URL, DEFAULT_FEED_URL, Resource, filter_by_category,
};
pub use dates::{display_feed_date, format_date_ar, parse_feed_date};
pub use error::{ContentError, ContentResult, TransportError};
pub use feed::{DESCRIPTION_BUDGET, FEED_LIMIT, first_image_src, summarize};
pub use models::{Author, Category, FeedItem, Post};
pub use transport::{RawResponse, Transport};
