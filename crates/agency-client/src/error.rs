use thiserror::Error;

/// Errors returned by [`crate::AgencyClient`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or TLS failure, or a non-2xx status from the server.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a JSON array of agency records.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl FetchError {
    /// HTTP status of the failed response, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Http(e) => e.status(),
            _ => None,
        }
    }
}
