//! Error types for endpoint resolution and fetching.

/// Failure of a single GET request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {message}")]
    Decode { url: String, message: String },

    /// No canned response (in-memory fetcher only).
    #[error("no response registered for {0}")]
    NotFound(String),
}

/// Errors raised while turning a user action into a fetch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no endpoint for resource \"{tag}\" (id: {})", .id.as_deref().unwrap_or("none"))]
    UnresolvedEndpoint { tag: String, id: Option<String> },

    #[error("unknown resource tag \"{0}\"")]
    UnknownResource(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// An identifier whose raw resource cannot be determined.
    #[error("unable to show raw data for {0}")]
    UnclassifiedRawId(String),

    #[error("no object id available for \"{0}\"")]
    MissingObjectId(String),
}

impl DispatchError {
    /// Whether the failure should be shown to the user rather than only logged.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, DispatchError::UnclassifiedRawId(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DispatchError::UnresolvedEndpoint {
            tag: "plan".into(),
            id: None,
        };
        assert_eq!(err.to_string(), "no endpoint for resource \"plan\" (id: none)");

        let err = DispatchError::from(FetchError::Status {
            url: "http://x/plans".into(),
            status: 503,
        });
        assert_eq!(err.to_string(), "http://x/plans answered with status 503");
    }

    #[test]
    fn test_only_raw_failures_are_user_visible() {
        assert!(DispatchError::UnclassifiedRawId("x".into()).is_user_visible());
        assert!(!DispatchError::UnknownResource("x".into()).is_user_visible());
        assert!(!DispatchError::MissingObjectId("plan".into()).is_user_visible());
    }
}
