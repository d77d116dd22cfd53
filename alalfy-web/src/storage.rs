use alalfy_core::theme::{Theme, ThemeStore, ThemeStoreError};

const THEME_KEY: &str = "alalfy_theme";
const DARK_CLASS: &str = "dark";

fn local_storage() -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    window.local_storage().ok()?
}

#[derive(Debug, Clone, Copy, Default)]
/// Theme preference in `localStorage`.
pub(crate) struct LocalThemeStore;

impl ThemeStore for LocalThemeStore {
    fn load(&self) -> Option<Theme> {
        let raw = local_storage()?.get_item(THEME_KEY).ok()??;
        raw.parse().ok()
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        let storage = local_storage()
            .ok_or_else(|| ThemeStoreError::Write("localStorage is not available".to_string()))?;
        storage
            .set_item(THEME_KEY, theme.as_str())
            .map_err(|_| ThemeStoreError::Write("failed to save theme".to_string()))
    }
}

pub(crate) fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok()?)
        .is_some_and(|query| query.matches())
}

/// Mirrors `theme` onto the `dark` class of `<html>`.
pub(crate) fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };

    let classes = root.class_list();
    let _ = match theme {
        Theme::Dark => classes.add_1(DARK_CLASS),
        Theme::Light => classes.remove_1(DARK_CLASS),
    };
}
