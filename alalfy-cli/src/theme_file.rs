use std::fs;
use std::io;
use std::path::PathBuf;

use alalfy_core::theme::{Theme, ThemeStore, ThemeStoreError};
use tracing::warn;

/// File the CLI keeps the theme preference in, relative to the working directory.
pub const THEME_FILE: &str = ".alalfy_theme";

#[derive(Debug, Clone)]
/// [`ThemeStore`] backed by a one-line text file.
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read theme file");
                return None;
            }
        };

        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring theme file");
                None
            }
        }
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        fs::write(&self.path, theme.as_str()).map_err(|err| ThemeStoreError::Write(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use alalfy_core::theme::ThemeState;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock must be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("alalfy_theme_{name}_{nanos}"))
    }

    #[test]
    fn missing_file_means_no_preference() {
        let store = FileThemeStore::new(temp_path("missing"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn toggle_survives_a_new_store() {
        let path = temp_path("toggle");
        let mut state = ThemeState::init(FileThemeStore::new(&path), false);
        state.toggle().expect("toggle must persist");

        let reloaded = ThemeState::init(FileThemeStore::new(&path), false);
        assert_eq!(reloaded.current(), Theme::Dark);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn garbage_file_falls_back_to_system_default() {
        let path = temp_path("garbage");
        fs::write(&path, "purple").expect("temp file must be writable");

        let state = ThemeState::init(FileThemeStore::new(&path), true);
        assert_eq!(state.current(), Theme::Dark);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unwritable_path_reports_write_error() {
        let store = FileThemeStore::new(std::env::temp_dir());
        assert!(matches!(store.save(Theme::Light), Err(ThemeStoreError::Write(_))));
    }
}
