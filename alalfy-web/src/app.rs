use alalfy_core::pages::{self, Navigation, PageFailure};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::category::CategoryView;
use crate::components::common::FailureScreen;
use crate::components::home::HomeView;
use crate::components::layout::{Footer, Header};
use crate::components::post::PostView;
use crate::routes::Route;
use crate::state::AppState;

fn current_route() -> Route {
    let hash = web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default();
    let decoded = js_sys::decode_uri_component(&hash)
        .map(String::from)
        .unwrap_or(hash);
    Route::from_hash(&decoded)
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(current_route());

    let _hashchange = window_event_listener(ev::hashchange, {
        let state = state.clone();
        move |_| state.navigate(current_route())
    });

    // header and footer links do not depend on the route
    let navigation = RwSignal::new(Navigation::default());
    spawn_local({
        let api = state.api.clone();
        async move {
            let loaded = pages::load_navigation(&api).await;
            let _ = navigation.try_set(loaded);
        }
    });

    let page = {
        let state = state.clone();
        move || match state.route.get() {
            Route::Home => view! { <HomeView state=state.clone() /> }.into_any(),
            Route::Category(slug) => {
                view! { <CategoryView state=state.clone() slug=slug /> }.into_any()
            }
            Route::Post(slug) => view! { <PostView state=state.clone() slug=slug /> }.into_any(),
            Route::NotFound => view! { <FailureScreen failure=PageFailure::unknown_route() /> }
                .into_any(),
        }
    };

    view! {
        <div class="site" dir="rtl" lang="ar">
            <Header state=state.clone() navigation=navigation />
            <main class="container">{page}</main>
            <Footer navigation=navigation />
        </div>
    }
}
