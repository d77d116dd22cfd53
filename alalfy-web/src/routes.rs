//! Hash routes: `#/`, `#/category/<slug>`, `#/post/<slug>`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Category(String),
    Post(String),
    NotFound,
}

impl Route {
    /// Parses an already percent-decoded `location.hash`.
    pub(crate) fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        if path.is_empty() {
            return Self::Home;
        }

        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("category"), Some(slug), None) if !slug.trim().is_empty() => {
                Self::Category(slug.trim().to_string())
            }
            (Some("post"), Some(slug), None) if !slug.trim().is_empty() => {
                Self::Post(slug.trim().to_string())
            }
            _ => Self::NotFound,
        }
    }

    pub(crate) fn href(&self) -> String {
        match self {
            Self::Home | Self::NotFound => "#/".to_string(),
            Self::Category(slug) => format!("#/category/{slug}"),
            Self::Post(slug) => format!("#/post/{slug}"),
        }
    }
}
