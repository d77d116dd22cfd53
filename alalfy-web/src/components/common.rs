use alalfy_core::Post;
use alalfy_core::pages::{PageFailure, Recovery};
use leptos::ev;
use leptos::prelude::*;

use crate::routes::Route;

#[component]
pub(crate) fn Spinner() -> impl IntoView {
    view! {
        <div class="centered">
            <div class="spinner" aria-busy="true"></div>
        </div>
    }
}

#[component]
pub(crate) fn FailureScreen(failure: PageFailure) -> impl IntoView {
    let recovery = failure.recovery();

    let on_recover = move |_: ev::MouseEvent| {
        let Some(location) = web_sys::window().map(|window| window.location()) else {
            return;
        };
        let _ = match recovery {
            Recovery::Reload => location.reload(),
            Recovery::BackToHome => location.set_hash(&Route::Home.href()),
        };
    };

    view! {
        <section class="centered">
            <h1>{failure.title}</h1>
            <p>{failure.message}</p>
            <button on:click=on_recover>{recovery.label()}</button>
        </section>
    }
}

/// Already-sanitized article HTML.
#[component]
pub(crate) fn RichContent(html: String) -> impl IntoView {
    view! { <div class="rich-content" inner_html=html></div> }
}

#[component]
pub(crate) fn PostCard(post: Post) -> impl IntoView {
    let href = Route::Post(post.slug.clone()).href();
    let category_href = Route::Category(post.category.slug.clone()).href();

    let banner = (!post.banner.is_empty()).then(|| {
        view! {
            <a href=href.clone()>
                <img src=post.banner.clone() alt=post.title.clone() loading="lazy" />
            </a>
        }
    });

    view! {
        <article class="card">
            {banner}
            <a class="category" href=category_href>{post.category.name}</a>
            <h3><a href=href>{post.title}</a></h3>
            <p>{post.short_description}</p>
            <span class="author">{post.author.name}</span>
        </article>
    }
}

#[component]
pub(crate) fn PostGrid(title: &'static str, posts: Vec<Post>) -> impl IntoView {
    view! {
        <section class="post-grid">
            <h2>{title}</h2>
            <div class="grid">
                {posts.into_iter().map(|post| view! { <PostCard post=post /> }).collect_view()}
            </div>
        </section>
    }
}
