//! Error types for the MCP server.

use rmcp::ErrorData;
use thiserror::Error;

/// Name used in protocol-visible error messages.
pub const SERVER_NAME: &str = "mcp-jina-fetch";

/// Reasons a `tools/call` request is rejected before (or instead of) reaching upstream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument: {name} must be a string")]
    InvalidArgument { name: &'static str },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Faults raised while building the reply (e.g. serialization).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InvocationError> for ErrorData {
    fn from(e: InvocationError) -> Self {
        let message = format!("Error processing {SERVER_NAME} query: {e}");
        match e {
            InvocationError::MissingArgument(_)
            | InvocationError::InvalidArgument { .. }
            | InvocationError::UnknownTool(_) => ErrorData::invalid_params(message, None),
            InvocationError::Internal(_) => ErrorData::internal_error(message, None),
        }
    }
}

/// Process-level errors (startup and transport).
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration errors (invalid timeout, malformed endpoint overrides)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Startup errors (logging or transport failed to initialize)
    #[error("Startup error: {0}")]
    Startup(String),

    /// Runtime errors (transport closed abnormally)
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<mcp_jina_client::ClientError> for ServerError {
    fn from(e: mcp_jina_client::ClientError) -> Self {
        match e {
            mcp_jina_client::ClientError::Config(s) => Self::Config(s),
        }
    }
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;
