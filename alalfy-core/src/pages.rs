//! Page composition: which collections a page needs, how they are fetched
//! together, and what the page shows while loading, on failure and when ready.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, warn};

use crate::api::ContentApi;
use crate::error::ContentError;
use crate::models::{Category, FeedItem, Post};
use crate::transport::Transport;

/// Message shown by the feed section when the feed has nothing to show.
pub const FEED_NOTHING_FOUND: &str = "لم يتم العثور على مقالات في الوقت الحالي";

/// Shown on a category page that has no posts yet.
pub const CATEGORY_EMPTY: &str = "No articles found in this category yet.";

#[derive(Debug, Clone, PartialEq)]
/// Tri-state status of a page.
pub enum PageState<T> {
    /// Requests are in flight.
    Loading,
    /// The page shows only the failure screen.
    Failed(PageFailure),
    /// Everything the page needs has arrived.
    Ready(T),
}

impl<T> PageState<T> {
    /// `true` while requests are in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The ready value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&PageFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Combines two loads of one page. A failure on either side fails the
    /// whole page, even while the other side is still loading.
    pub fn zip<U>(self, other: PageState<U>) -> PageState<(T, U)> {
        match (self, other) {
            (Self::Failed(failure), _) | (_, PageState::Failed(failure)) => {
                PageState::Failed(failure)
            }
            (Self::Ready(left), PageState::Ready(right)) => PageState::Ready((left, right)),
            _ => PageState::Loading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a page could not be shown.
pub enum FailureKind {
    /// An upstream request failed.
    Unavailable,
    /// The requested slug does not exist.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The single action offered on a failure screen.
pub enum Recovery {
    /// Full page reload.
    Reload,
    /// Navigate back to the home page.
    BackToHome,
}

impl Recovery {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Reload => "Try Again",
            Self::BackToHome => "العودة للرئيسية",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// User-facing failure screen.
pub struct PageFailure {
    /// Failure category.
    pub kind: FailureKind,
    /// Heading.
    pub title: &'static str,
    /// Explanation under the heading.
    pub message: &'static str,
}

impl PageFailure {
    fn unavailable(message: &'static str) -> Self {
        Self {
            kind: FailureKind::Unavailable,
            title: "Oops! Something went wrong",
            message,
        }
    }

    fn not_found(title: &'static str, message: &'static str) -> Self {
        Self {
            kind: FailureKind::NotFound,
            title,
            message,
        }
    }

    /// Failure shown for a route that matches no page.
    pub fn unknown_route() -> Self {
        Self::not_found("الصفحة غير موجودة", "الصفحة التي تبحث عنها غير موجودة.")
    }

    /// Recovery action for this failure.
    pub fn recovery(&self) -> Recovery {
        match self.kind {
            FailureKind::Unavailable => Recovery::Reload,
            FailureKind::NotFound => Recovery::BackToHome,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Home page content, each section in the order the API returned it.
pub struct HomePage {
    /// Hero posts; the first one is the banner.
    pub hero: Vec<Post>,
    /// Featured posts.
    pub featured: Vec<Post>,
    /// Latest posts.
    pub latest: Vec<Post>,
}

impl HomePage {
    /// Post shown in the hero banner.
    pub fn hero_post(&self) -> Option<&Post> {
        self.hero.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Posts of one category, for sectioned listings.
pub struct CategorySection {
    /// The category, as embedded in its first post.
    pub category: Category,
    /// Posts in server order.
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq)]
/// Category page content.
pub struct CategoryPage {
    /// The category.
    pub category: Category,
    /// Long description after sanitization.
    pub description_html: String,
    /// Posts filed under the category.
    pub posts: Vec<Post>,
}

impl CategoryPage {
    /// `true` when the category exists but has no posts; the page then
    /// shows [`CATEGORY_EMPTY`] instead of a listing.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Single post page content.
pub struct PostPage {
    /// The post.
    pub post: Post,
    /// Body after sanitization and code-block rewriting.
    pub body_html: String,
}

#[derive(Debug, Clone, PartialEq)]
/// Cross-posted feed section.
pub struct FeedSection {
    /// Items in upstream order; the position is the key.
    pub items: Vec<FeedItem>,
}

impl FeedSection {
    /// `true` when the section shows its "nothing found" message.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Header and footer category links.
pub struct Navigation {
    /// Header links.
    pub header: Vec<Category>,
    /// Footer links.
    pub footer: Vec<Category>,
}

/// Hero, featured and latest posts, fetched in parallel.
pub async fn load_home<T: Transport>(api: &ContentApi<T>) -> PageState<HomePage> {
    let result = futures::try_join!(api.hero_posts(), api.featured_posts(), api.latest_posts());
    match result {
        Ok((hero, featured, latest)) => PageState::Ready(HomePage {
            hero,
            featured,
            latest,
        }),
        Err(err) => {
            error!(error = %err, "error loading home page");
            PageState::Failed(PageFailure::unavailable(
                "Failed to load blog posts. Please try again later.",
            ))
        }
    }
}

/// All category-tagged posts grouped into one section per category.
pub async fn load_category_sections<T: Transport>(
    api: &ContentApi<T>,
) -> PageState<Vec<CategorySection>> {
    match api.category_posts().await {
        Ok(posts) => PageState::Ready(group_by_category(posts)),
        Err(err) => {
            error!(error = %err, "error loading category sections");
            PageState::Failed(PageFailure::unavailable("Failed to load category posts"))
        }
    }
}

/// Category metadata and its posts, fetched in parallel.
pub async fn load_category<T: Transport>(
    api: &ContentApi<T>,
    slug: &str,
) -> PageState<CategoryPage> {
    let result = futures::try_join!(api.all_categories(), api.posts_by_category(slug));
    let (categories, posts) = match result {
        Ok(pair) => pair,
        Err(err) => {
            error!(error = %err, slug, "error loading category");
            return PageState::Failed(PageFailure::unavailable("Failed to load category data"));
        }
    };

    match find_category(categories, slug) {
        Ok(category) => PageState::Ready(CategoryPage {
            description_html: alalfy_render::render_html(&category.description),
            category,
            posts,
        }),
        Err(err) => {
            warn!(error = %err, "category page requested for unknown slug");
            PageState::Failed(PageFailure::not_found(
                "Category Not Found",
                "The category you're looking for doesn't exist.",
            ))
        }
    }
}

/// A single post, looked up by slug across the hero, featured and latest lists.
///
/// The API has no single-post endpoint; the three lists are fetched in
/// parallel and searched in that order.
pub async fn load_post<T: Transport>(api: &ContentApi<T>, slug: &str) -> PageState<PostPage> {
    let result = futures::try_join!(api.hero_posts(), api.featured_posts(), api.latest_posts());
    let (hero, featured, latest) = match result {
        Ok(lists) => lists,
        Err(err) => {
            error!(error = %err, slug, "error loading post");
            return PageState::Failed(PageFailure::unavailable("Failed to load post"));
        }
    };

    let candidates = hero.into_iter().chain(featured).chain(latest);
    match find_post(candidates, slug) {
        Ok(post) => PageState::Ready(PostPage {
            body_html: alalfy_render::render_html(&post.description),
            post,
        }),
        Err(err) => {
            warn!(error = %err, "post page requested for unknown slug");
            PageState::Failed(PageFailure::not_found(
                "المقال غير موجود",
                "المقال الذي تبحث عنه غير متوفر.",
            ))
        }
    }
}

/// External feed items. Upstream failures show up as an empty section.
pub async fn load_feed<T: Transport>(api: &ContentApi<T>) -> FeedSection {
    FeedSection {
        items: api.feed_items().await,
    }
}

/// Header and footer categories in parallel; a failing side is left empty.
pub async fn load_navigation<T: Transport>(api: &ContentApi<T>) -> Navigation {
    let (header, footer) = futures::join!(api.header_categories(), api.footer_categories());
    Navigation {
        header: header.unwrap_or_else(|err| {
            warn!(error = %err, "failed to load header categories");
            Vec::new()
        }),
        footer: footer.unwrap_or_else(|err| {
            warn!(error = %err, "failed to load footer categories");
            Vec::new()
        }),
    }
}

/// Groups posts by category slug. Sections follow the order in which each
/// category first appears; posts keep their relative order.
pub fn group_by_category(posts: Vec<Post>) -> Vec<CategorySection> {
    let mut sections: Vec<CategorySection> = Vec::new();
    for post in posts {
        match sections
            .iter_mut()
            .find(|section| section.category.slug == post.category.slug)
        {
            Some(section) => section.posts.push(post),
            None => sections.push(CategorySection {
                category: post.category.clone(),
                posts: vec![post],
            }),
        }
    }
    sections
}

fn find_category(categories: Vec<Category>, slug: &str) -> Result<Category, ContentError> {
    categories
        .into_iter()
        .find(|category| category.slug == slug)
        .ok_or_else(|| ContentError::NotFound {
            kind: "category",
            slug: slug.to_string(),
        })
}

fn find_post(posts: impl IntoIterator<Item = Post>, slug: &str) -> Result<Post, ContentError> {
    posts
        .into_iter()
        .find(|post| post.slug == slug)
        .ok_or_else(|| ContentError::NotFound {
            kind: "post",
            slug: slug.to_string(),
        })
}

#[derive(Debug, Clone, Default)]
/// Counter of navigations. A load started under one navigation must not
/// write into the page of a later one.
pub struct NavigationEpoch {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
/// Handle taken when a load starts.
pub struct LoadTicket {
    epoch: Arc<AtomicU64>,
    issued: u64,
}

impl NavigationEpoch {
    /// Fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new navigation; tickets from earlier ones go stale.
    pub fn advance(&self) -> LoadTicket {
        let issued = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            epoch: self.current.clone(),
            issued,
        }
    }
}

impl LoadTicket {
    /// `true` while no newer navigation has started.
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.issued
    }
}
