use alalfy_core::pages::{self, PageState, PostPage};
use leptos::prelude::*;

use crate::components::common::{FailureScreen, RichContent, Spinner};
use crate::routes::Route;
use crate::state::{AppState, load_page};

#[component]
pub(crate) fn PostView(state: AppState, slug: String) -> impl IntoView {
    let page = RwSignal::new(PageState::<PostPage>::Loading);
    load_page(&state, page, move |api| async move {
        pages::load_post(&api, &slug).await
    });

    move || match page.get() {
        PageState::Loading => view! { <Spinner /> }.into_any(),
        PageState::Failed(failure) => view! { <FailureScreen failure=failure /> }.into_any(),
        PageState::Ready(page) => view! { <PostArticle page=page /> }.into_any(),
    }
}

#[component]
fn PostArticle(page: PostPage) -> impl IntoView {
    let post = page.post;
    let category_href = Route::Category(post.category.slug.clone()).href();
    let banner = (!post.banner.is_empty()).then(|| {
        view! { <img class="banner" src=post.banner.clone() alt=post.title.clone() /> }
    });

    view! {
        <article class="post">
            <a class="category" href=category_href>{post.category.name}</a>
            <h1>{post.title}</h1>
            <div class="author">
                <img class="avatar" src=post.author.avatar alt=post.author.name.clone() />
                <span>{post.author.name}</span>
                <span class="email">{post.author.email}</span>
            </div>
            {banner}
            <p class="lead">{post.short_description}</p>
            <RichContent html=page.body_html />
        </article>
    }
}
