use alalfy_core::pages::{self, CATEGORY_EMPTY, CategoryPage, PageState};
use leptos::prelude::*;

use crate::components::common::{FailureScreen, PostGrid, RichContent, Spinner};
use crate::state::{AppState, load_page};

#[component]
pub(crate) fn CategoryView(state: AppState, slug: String) -> impl IntoView {
    let page = RwSignal::new(PageState::<CategoryPage>::Loading);
    load_page(&state, page, move |api| async move {
        pages::load_category(&api, &slug).await
    });

    move || match page.get() {
        PageState::Loading => view! { <Spinner /> }.into_any(),
        PageState::Failed(failure) => view! { <FailureScreen failure=failure /> }.into_any(),
        PageState::Ready(page) => {
            let posts = if page.is_empty() {
                view! { <p class="centered">{CATEGORY_EMPTY}</p> }.into_any()
            } else {
                view! { <PostGrid title="المقالات" posts=page.posts /> }.into_any()
            };
            view! {
                <section class="category-header">
                    <h1>{page.category.name}</h1>
                    <p>{page.category.short_description}</p>
                    <RichContent html=page.description_html />
                </section>
                {posts}
            }
            .into_any()
        }
    }
}
