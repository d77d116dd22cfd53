use alalfy_core::pages::{self, CategorySection, FeedSection, HomePage, PageState};
use leptos::prelude::*;

use crate::components::common::{FailureScreen, PostCard, PostGrid, Spinner};
use crate::components::feed::FeedList;
use crate::routes::Route;
use crate::state::{AppState, load_page};

#[component]
pub(crate) fn HomeView(state: AppState) -> impl IntoView {
    let home = RwSignal::new(PageState::<HomePage>::Loading);
    let sections = RwSignal::new(PageState::<Vec<CategorySection>>::Loading);
    let feed = RwSignal::new(PageState::<FeedSection>::Loading);

    load_page(&state, home, |api| async move { pages::load_home(&api).await });
    load_page(&state, sections, |api| async move {
        pages::load_category_sections(&api).await
    });
    load_page(&state, feed, |api| async move {
        PageState::Ready(pages::load_feed(&api).await)
    });

    let feed_section = move || match feed.get() {
        PageState::Ready(feed) => view! { <FeedList feed=feed /> }.into_any(),
        _ => view! { <Spinner /> }.into_any(),
    };

    // the page renders whole or shows only the failure
    move || match home.get().zip(sections.get()) {
        PageState::Loading => view! { <Spinner /> }.into_any(),
        PageState::Failed(failure) => view! { <FailureScreen failure=failure /> }.into_any(),
        PageState::Ready((page, sections)) => view! {
            <HomeTop page=page />
            {sections
                .into_iter()
                .map(|section| view! { <CategoryBlock section=section /> })
                .collect_view()}
            <section class="feed">
                <h2>"مقالات من المدونة"</h2>
                {feed_section}
            </section>
        }
        .into_any(),
    }
}

#[component]
fn HomeTop(page: HomePage) -> impl IntoView {
    let hero = page.hero_post().cloned().map(|post| {
        let href = Route::Post(post.slug.clone()).href();
        view! {
            <section class="hero">
                <img src=post.banner alt=post.title.clone() />
                <h1><a href=href>{post.title}</a></h1>
                <p>{post.short_description}</p>
            </section>
        }
    });

    view! {
        {hero}
        <PostGrid title="مقالات مميزة" posts=page.featured />
        <PostGrid title="أحدث المقالات" posts=page.latest />
    }
}

#[component]
fn CategoryBlock(section: CategorySection) -> impl IntoView {
    let href = Route::Category(section.category.slug.clone()).href();

    view! {
        <section class="category-section">
            <h2><a href=href>{section.category.name}</a></h2>
            <div class="grid">
                {section
                    .posts
                    .into_iter()
                    .map(|post| view! { <PostCard post=post /> })
                    .collect_view()}
            </div>
        </section>
    }
}
