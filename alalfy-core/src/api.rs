use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::{ContentError, ContentResult};
use crate::feed::{self, FEED_LIMIT};
use crate::models::{Category, Envelope, FeedEnvelope, FeedItem, Post};
use crate::transport::Transport;

/// Base URL of the blog API.
pub const DEFAULT_API_BASE_URL: &str = "https://blog-backend.alalfy.com/api";

/// Feed bridge URL serving the author's Medium feed as JSON.
pub const DEFAULT_FEED_URL: &str = "https://api.rss2json.com/v1/api.json?rss_url=https%3A%2F%2Fmedium.com%2Ffeed%2F%40alalfy";

/// A primary API collection: display name plus path under the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Name used in errors and logs.
    pub name: &'static str,
    /// Path appended to the base URL.
    pub path: &'static str,
}

impl Resource {
    pub const HERO_POSTS: Self = Self::new("hero posts", "/posts/hero");
    pub const FEATURED_POSTS: Self = Self::new("featured posts", "/posts/featured");
    pub const LATEST_POSTS: Self = Self::new("latest posts", "/posts/latest");
    pub const CATEGORY_POSTS: Self = Self::new("posts by category", "/posts/categories");
    pub const ALL_CATEGORIES: Self = Self::new("all categories", "/categories/all");
    pub const HEADER_CATEGORIES: Self = Self::new("header categories", "/categories/header");
    pub const FOOTER_CATEGORIES: Self = Self::new("footer categories", "/categories/footer");

    const fn new(name: &'static str, path: &'static str) -> Self {
        Self { name, path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the content layer sends its requests.
pub struct ApiConfig {
    /// Base URL of the blog API, e.g. `https://blog-backend.alalfy.com/api`.
    pub base_url: String,
    /// Full URL of the feed bridge.
    pub feed_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Content Fetch Layer: one operation per resource kind.
///
/// Every call re-fetches; nothing is cached and nothing is retried.
pub struct ContentApi<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> ContentApi<T> {
    /// Creates the API over a transport.
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET + status check + envelope decode for one collection.
    async fn fetch_collection<R>(&self, resource: Resource) -> ContentResult<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(resource.path);
        debug!(resource = resource.name, %url, "fetching collection");

        let result = self.fetch_envelope::<R>(resource, &url).await;
        if let Err(err) = &result {
            error!(resource = resource.name, error = %err, "error fetching {}", resource.name);
        }
        result
    }

    async fn fetch_envelope<R>(&self, resource: Resource, url: &str) -> ContentResult<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|err| ContentError::from_transport(resource.name, err))?;
        if !response.is_success() {
            return Err(ContentError::from_status(resource.name, response.status));
        }

        let envelope: Envelope<R> = serde_json::from_str(&response.body)
            .map_err(|err| ContentError::from_decode(resource.name, err))?;
        Ok(envelope.data)
    }

    /// Posts for the hero banner.
    pub async fn hero_posts(&self) -> ContentResult<Vec<Post>> {
        self.fetch_collection(Resource::HERO_POSTS).await
    }

    /// Featured posts.
    pub async fn featured_posts(&self) -> ContentResult<Vec<Post>> {
        self.fetch_collection(Resource::FEATURED_POSTS).await
    }

    /// Latest posts.
    pub async fn latest_posts(&self) -> ContentResult<Vec<Post>> {
        self.fetch_collection(Resource::LATEST_POSTS).await
    }

    /// Every category-tagged post, across all categories.
    pub async fn category_posts(&self) -> ContentResult<Vec<Post>> {
        self.fetch_collection(Resource::CATEGORY_POSTS).await
    }

    /// Posts filed under `slug`.
    ///
    /// The API has no per-category endpoint, so this fetches every
    /// category-tagged post and filters locally. No match is an empty list,
    /// not an error.
    pub async fn posts_by_category(&self, slug: &str) -> ContentResult<Vec<Post>> {
        let posts = self.category_posts().await?;
        Ok(filter_by_category(posts, slug))
    }

    /// All categories.
    pub async fn all_categories(&self) -> ContentResult<Vec<Category>> {
        self.fetch_collection(Resource::ALL_CATEGORIES).await
    }

    /// Categories shown in the site header.
    pub async fn header_categories(&self) -> ContentResult<Vec<Category>> {
        self.fetch_collection(Resource::HEADER_CATEGORIES).await
    }

    /// Categories shown in the site footer.
    pub async fn footer_categories(&self) -> ContentResult<Vec<Category>> {
        self.fetch_collection(Resource::FOOTER_CATEGORIES).await
    }

    /// Up to six cross-posted items from the external feed.
    ///
    /// Never fails: any upstream problem yields an empty list.
    pub async fn feed_items(&self) -> Vec<FeedItem> {
        let url = &self.config.feed_url;
        debug!(%url, "fetching external feed");

        let response = match self.transport.get(url).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "external feed unavailable");
                return Vec::new();
            }
        };
        if !response.is_success() {
            warn!(status = response.status, "external feed returned an error status");
            return Vec::new();
        }

        match serde_json::from_str::<FeedEnvelope>(&response.body) {
            Ok(envelope) => envelope
                .items
                .into_iter()
                .take(FEED_LIMIT)
                .map(feed::normalize_item)
                .collect(),
            Err(err) => {
                warn!(error = %err, "external feed response is malformed");
                Vec::new()
            }
        }
    }
}

/// Keeps posts whose category slug equals `slug`, in their original order.
pub fn filter_by_category(posts: Vec<Post>, slug: &str) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| post.category.slug == slug)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::testing::{FakeTransport, envelope};
    use crate::models::fixtures;

    fn api(transport: FakeTransport) -> ContentApi<FakeTransport> {
        ContentApi::new(
            transport,
            ApiConfig {
                base_url: "http://api.test/api/".to_string(),
                feed_url: "http://feed.test/json".to_string(),
            },
        )
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let api = api(FakeTransport::new());
        assert_eq!(api.endpoint("/posts/hero"), "http://api.test/api/posts/hero");
    }

    #[tokio::test]
    async fn hero_posts_returns_envelope_data_in_order() {
        let transport = FakeTransport::new().respond(
            "http://api.test/api/posts/hero",
            200,
            envelope(&[fixtures::post(2, "b", "x"), fixtures::post(1, "a", "x")]),
        );
        let posts = api(transport.clone())
            .hero_posts()
            .await
            .expect("hero posts must load");

        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(transport.requests(), vec!["http://api.test/api/posts/hero"]);
    }

    #[tokio::test]
    async fn every_collection_operation_fails_on_500() {
        let mut transport = FakeTransport::new();
        for path in [
            "posts/hero",
            "posts/featured",
            "posts/latest",
            "posts/categories",
            "categories/all",
            "categories/header",
            "categories/footer",
        ] {
            transport = transport.respond(&format!("http://api.test/api/{path}"), 500, "oops");
        }
        let api = api(transport);

        let results = [
            api.hero_posts().await.map(|_| ()),
            api.featured_posts().await.map(|_| ()),
            api.latest_posts().await.map(|_| ()),
            api.category_posts().await.map(|_| ()),
            api.posts_by_category("x").await.map(|_| ()),
            api.all_categories().await.map(|_| ()),
            api.header_categories().await.map(|_| ()),
            api.footer_categories().await.map(|_| ()),
        ];
        for result in results {
            match result {
                Err(ContentError::FetchFailure { reason, .. }) => {
                    assert_eq!(reason, "http status 500")
                }
                other => panic!("expected FetchFailure, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn fetch_failure_carries_resource_name() {
        let transport =
            FakeTransport::new().respond("http://api.test/api/categories/footer", 503, "");
        let err = api(transport)
            .footer_categories()
            .await
            .expect_err("must fail");
        match err {
            ContentError::FetchFailure { resource, .. } => {
                assert_eq!(resource, "footer categories")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn network_error_maps_to_fetch_failure() {
        let transport = FakeTransport::new().fail(
            "http://api.test/api/posts/latest",
            TransportError::Network("connection reset".to_string()),
        );
        let err = api(transport).latest_posts().await.expect_err("must fail");
        assert!(matches!(err, ContentError::FetchFailure { resource: "latest posts", .. }));
    }

    #[tokio::test]
    async fn body_without_envelope_is_a_fetch_failure() {
        let transport =
            FakeTransport::new().respond("http://api.test/api/categories/all", 200, r#"[{"id":1}]"#);
        let err = api(transport).all_categories().await.expect_err("must fail");
        match err {
            ContentError::FetchFailure { reason, .. } => assert!(reason.starts_with("decode error")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn posts_by_category_returns_exactly_the_matching_post() {
        let transport = FakeTransport::new().respond(
            "http://api.test/api/posts/categories",
            200,
            envelope(&[
                fixtures::post(1, "a", "rust"),
                fixtures::post(2, "b", "x"),
                fixtures::post(3, "c", "go"),
            ]),
        );
        let posts = api(transport)
            .posts_by_category("x")
            .await
            .expect("must load");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 2);
    }

    #[tokio::test]
    async fn posts_by_category_without_match_is_empty_not_error() {
        let transport = FakeTransport::new().respond(
            "http://api.test/api/posts/categories",
            200,
            envelope(&[fixtures::post(1, "a", "rust")]),
        );
        let posts = api(transport)
            .posts_by_category("x")
            .await
            .expect("must load");
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn feed_without_items_is_empty() {
        let transport =
            FakeTransport::new().respond("http://feed.test/json", 200, r#"{"status":"error"}"#);
        assert!(api(transport).feed_items().await.is_empty());
    }

    #[tokio::test]
    async fn feed_failure_status_or_network_error_is_empty() {
        let failing = FakeTransport::new().respond("http://feed.test/json", 500, "");
        assert!(api(failing).feed_items().await.is_empty());

        let unreachable = FakeTransport::new();
        assert!(api(unreachable).feed_items().await.is_empty());
    }

    #[tokio::test]
    async fn feed_is_capped_at_six_items_in_upstream_order() {
        let items: Vec<String> = (0..9)
            .map(|i| format!(r#"{{"title":"t{i}","link":"l{i}","pubDate":"","description":"d"}}"#))
            .collect();
        let body = format!(r#"{{"items":[{}]}}"#, items.join(","));
        let transport = FakeTransport::new().respond("http://feed.test/json", 200, body);

        let feed = api(transport).feed_items().await;
        let titles: Vec<&str> = feed.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["t0", "t1", "t2", "t3", "t4", "t5"]);
    }
}
