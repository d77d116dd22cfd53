use std::future::Future;

use alalfy_core::pages::{LoadTicket, NavigationEpoch, PageState};
use alalfy_core::theme::{Theme, ThemeState};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{Api, content_api};
use crate::routes::Route;
use crate::storage::{self, LocalThemeStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: Api,
    pub(crate) route: RwSignal<Route>,
    pub(crate) theme: RwSignal<Theme>,
    pub(crate) menu_open: RwSignal<bool>,
    epoch: NavigationEpoch,
    ticket: StoredValue<LoadTicket>,
    theme_state: StoredValue<ThemeState<LocalThemeStore>>,
}

impl AppState {
    pub(crate) fn new(route: Route) -> Self {
        let theme_state = ThemeState::init(LocalThemeStore, storage::system_prefers_dark());
        let theme = theme_state.current();
        storage::apply_theme(theme);

        let epoch = NavigationEpoch::new();
        let ticket = epoch.advance();

        Self {
            api: content_api(),
            route: RwSignal::new(route),
            theme: RwSignal::new(theme),
            menu_open: RwSignal::new(false),
            epoch,
            ticket: StoredValue::new(ticket),
            theme_state: StoredValue::new(theme_state),
        }
    }

    /// Switches page. Loads started for the previous page go stale.
    pub(crate) fn navigate(&self, route: Route) {
        if self.route.get_untracked() == route {
            return;
        }
        self.ticket.set_value(self.epoch.advance());
        self.menu_open.set(false);
        self.route.set(route);
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    pub(crate) fn ticket(&self) -> LoadTicket {
        self.ticket.get_value()
    }

    /// The only writer of the theme preference.
    pub(crate) fn toggle_theme(&self) {
        let mut current = self.theme.get_untracked();
        self.theme_state.update_value(|state| {
            if let Err(err) = state.toggle() {
                web_sys::console::warn_1(&err.to_string().into());
            }
            current = state.current();
        });
        storage::apply_theme(current);
        self.theme.set(current);
    }
}

/// Runs `load` for the current page and writes its result into `page`,
/// unless the user has navigated away in the meantime.
pub(crate) fn load_page<T, F, Fut>(state: &AppState, page: RwSignal<PageState<T>>, load: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(Api) -> Fut + 'static,
    Fut: Future<Output = PageState<T>> + 'static,
{
    let ticket = state.ticket();
    let api = state.api.clone();
    page.set(PageState::Loading);

    spawn_local(async move {
        let result = load(api).await;
        if ticket.is_current() {
            let _ = page.try_set(result);
        }
    });
}
