use thiserror::Error;

/// Error type for service client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream service answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        status: u16,
        url: String,
    },

    /// The requested resource does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether the error indicates a missing resource rather than an outage
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
