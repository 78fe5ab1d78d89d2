//! Error types for `mcp-jina-client`.

use thiserror::Error;

/// Errors raised while building the client.
///
/// Upstream failures during a call are never raised; they are carried in [`UpstreamError`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration errors (zero timeout, malformed endpoint overrides).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a single upstream call did not produce a body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("request to {url} failed: {detail}")]
    Transport { url: String, detail: String },

    #[error("{url} returned {status} {reason}: {body}")]
    Status {
        url: String,
        status: u16,
        reason: String,
        body: String,
    },
}

impl UpstreamError {
    /// The (redacted) URL the failed request was sent to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. } | Self::Transport { url, .. } | Self::Status { url, .. } => {
                url
            }
        }
    }
}

/// Result type alias for client construction.
pub type Result<T> = std::result::Result<T, ClientError>;
