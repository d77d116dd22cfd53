use thiserror::Error;

#[derive(Debug, Error)]
/// Errors of the content layer.
pub enum ContentError {
    /// The request for `resource` failed: network error, non-2xx status
    /// or a body that is not the expected envelope.
    #[error("failed to fetch {resource}: {reason}")]
    FetchFailure {
        /// Human-readable resource name, e.g. `featured posts`.
        resource: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// A slug is absent from a collection that was fetched successfully.
    #[error("{kind} not found: {slug}")]
    NotFound {
        /// Entity kind (`post`, `category`).
        kind: &'static str,
        /// The slug that was looked up.
        slug: String,
    },
}

/// Result of content layer operations.
pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Failure reported by a [`Transport`](crate::Transport) before any status is known.
pub enum TransportError {
    /// Connection, DNS or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read.
    #[error("body read error: {0}")]
    Body(String),
}

impl ContentError {
    pub(crate) fn fetch(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::FetchFailure {
            resource,
            reason: reason.into(),
        }
    }

    pub(crate) fn from_status(resource: &'static str, status: u16) -> Self {
        Self::fetch(resource, format!("http status {status}"))
    }

    pub(crate) fn from_transport(resource: &'static str, err: TransportError) -> Self {
        Self::fetch(resource, err.to_string())
    }

    pub(crate) fn from_decode(resource: &'static str, err: serde_json::Error) -> Self {
        Self::fetch(resource, format!("decode error: {err}"))
    }

    /// `true` for [`ContentError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_message_names_the_resource() {
        let err = ContentError::from_status("hero posts", 500);
        assert_eq!(err.to_string(), "failed to fetch hero posts: http status 500");
        assert!(!err.is_not_found());
    }

    #[test]
    fn transport_error_is_wrapped_into_fetch_failure() {
        let err = ContentError::from_transport(
            "latest posts",
            TransportError::Network("connection refused".to_string()),
        );
        match err {
            ContentError::FetchFailure { resource, reason } => {
                assert_eq!(resource, "latest posts");
                assert!(reason.contains("connection refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
