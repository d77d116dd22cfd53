use alalfy_core::Category;
use alalfy_core::pages::Navigation;
use alalfy_core::theme::Theme;
use leptos::ev;
use leptos::prelude::*;

use crate::routes::Route;
use crate::state::AppState;

fn category_links(categories: Vec<Category>) -> impl IntoView {
    categories
        .into_iter()
        .map(|category| {
            let href = Route::Category(category.slug.clone()).href();
            view! { <a href=href>{category.name}</a> }
        })
        .collect_view()
}

#[component]
pub(crate) fn Header(state: AppState, navigation: RwSignal<Navigation>) -> impl IntoView {
    let menu_open = state.menu_open;
    let theme = state.theme;

    let on_toggle_theme = {
        let state = state.clone();
        move |_: ev::MouseEvent| state.toggle_theme()
    };

    let theme_label = move || match theme.get() {
        Theme::Dark => "الوضع الفاتح",
        Theme::Light => "الوضع الداكن",
    };

    view! {
        <header class="site-header">
            <a class="brand" href=Route::Home.href()>"Alalfy Dev"</a>
            <button class="menu-toggle" on:click=move |_| menu_open.update(|open| *open = !*open)>
                "☰"
            </button>
            <nav class:open=move || menu_open.get()>
                <a href=Route::Home.href()>"الرئيسية"</a>
                {move || category_links(navigation.get().header)}
            </nav>
            <button class="theme-toggle" on:click=on_toggle_theme>{theme_label}</button>
        </header>
    }
}

#[component]
pub(crate) fn Footer(navigation: RwSignal<Navigation>) -> impl IntoView {
    view! {
        <footer class="site-footer">
            <nav>{move || category_links(navigation.get().footer)}</nav>
            <p>"© Alalfy Dev"</p>
        </footer>
    }
}
