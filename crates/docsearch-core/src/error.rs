//! DocSearch error type.

/// Errors raised by DocSearch library crates.
///
/// A missing document is not an error; lookups return `Option` instead.
#[derive(Debug, thiserror::Error)]
pub enum DocSearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote endpoint could not be reached.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote endpoint answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The remote endpoint answered 2xx with a body we cannot use.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A required request field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// MCP transport or protocol failure on the client side.
    #[error("MCP error: {0}")]
    Mcp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocSearchError>;
