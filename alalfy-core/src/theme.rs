use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Site colour scheme.
pub enum Theme {
    /// Light scheme.
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Persisted / CSS class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other scheme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeStoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeStoreError::Invalid(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Failures of theme persistence.
pub enum ThemeStoreError {
    /// The persisted value is not a known theme.
    #[error("unknown theme value: {0:?}")]
    Invalid(String),

    /// The backing storage refused the write.
    #[error("failed to persist theme: {0}")]
    Write(String),
}

/// Where the theme preference survives between page loads.
pub trait ThemeStore {
    /// Persisted preference, if any.
    fn load(&self) -> Option<Theme>;
    /// Persists `theme`.
    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError>;
}

/// Process-wide theme. The only reader and writer of the persisted value.
#[derive(Debug)]
pub struct ThemeState<S> {
    store: S,
    current: Theme,
}

impl<S: ThemeStore> ThemeState<S> {
    /// Reads the persisted preference, falling back to the system default.
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let current = store
            .load()
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        Self { store, current }
    }

    /// Active theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// `true` for the dark scheme.
    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    /// Switches the theme and persists it.
    ///
    /// The in-memory value changes even when persisting fails.
    pub fn set(&mut self, theme: Theme) -> Result<(), ThemeStoreError> {
        self.current = theme;
        self.store.save(theme)
    }

    /// Flips the theme and persists it.
    pub fn toggle(&mut self) -> Result<Theme, ThemeStoreError> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[derive(Debug, Clone, Default)]
/// Non-persistent store, shared between clones.
pub struct MemoryThemeStore {
    value: Arc<Mutex<Option<Theme>>>,
}

impl MemoryThemeStore {
    /// Store pre-filled with `theme`.
    pub fn with(theme: Theme) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(theme))),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.value.lock().ok().and_then(|value| *value)
    }

    fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| ThemeStoreError::Write("theme store lock poisoned".to_string()))?;
        *value = Some(theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl ThemeStore for ReadOnlyStore {
        fn load(&self) -> Option<Theme> {
            None
        }

        fn save(&self, _theme: Theme) -> Result<(), ThemeStoreError> {
            Err(ThemeStoreError::Write("read-only".to_string()))
        }
    }

    #[test]
    fn init_prefers_persisted_value_over_system_default() {
        let state = ThemeState::init(MemoryThemeStore::with(Theme::Light), true);
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn init_falls_back_to_system_default() {
        let state = ThemeState::init(MemoryThemeStore::default(), true);
        assert!(state.is_dark());
    }

    #[test]
    fn toggle_updates_memory_and_store() {
        let store = MemoryThemeStore::default();
        let mut state = ThemeState::init(store.clone(), false);

        let next = state.toggle().expect("toggle must persist");
        assert_eq!(next, Theme::Dark);
        assert_eq!(store.load(), Some(Theme::Dark));
    }

    #[test]
    fn failed_persist_still_switches_in_memory() {
        let mut state = ThemeState::init(ReadOnlyStore, false);
        let err = state.set(Theme::Dark).expect_err("store is read-only");
        assert!(matches!(err, ThemeStoreError::Write(_)));
        assert!(state.is_dark());
    }

    #[test]
    fn theme_parses_persisted_text() {
        assert_eq!(" dark\n".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
