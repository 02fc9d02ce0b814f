use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network, TLS or timeout failure from `reqwest`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// GraphQL responded 200 with a top-level `errors` array.
    #[error("GraphQL errors from {url}: {}", messages.join("; "))]
    GraphQl { url: String, messages: Vec<String> },

    #[error("invalid Admin API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ShopifyError {
    /// HTTP status of the failed upstream call, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ShopifyError::UnexpectedStatus { status, .. } => Some(*status),
            ShopifyError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// `true` for failures where the Admin API was never reached or never
    /// answered (connect errors, timeouts).
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            ShopifyError::Http(e) => e.status().is_none() && !e.is_decode(),
            _ => false,
        }
    }
}
