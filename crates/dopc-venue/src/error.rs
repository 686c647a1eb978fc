use thiserror::Error;

/// Errors returned by the venue API client.
#[derive(Debug, Error)]
pub enum VenueError {
    /// Network, timeout, or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The venue API does not know this slug.
    #[error("venue not found: {slug}")]
    NotFound { slug: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid venue API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("venue {slug} has invalid coordinates: {source}")]
    InvalidCoordinates {
        slug: String,
        #[source]
        source: dopc_core::CoordinateError,
    },
}

impl VenueError {
    /// `true` when the venue API took too long to answer.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, VenueError::Http(e) if e.is_timeout())
    }
}
