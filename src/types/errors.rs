//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the RabbitMQ MCP server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (bad env values, unreadable cert material).
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation errors (tool arguments, startup catalog checks).
    #[error("validation error: {0}")]
    Validation(String),

    /// Non-2xx response from the management API. The rendered form is the
    /// contract downstream callers pattern-match on.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failures reaching the management endpoint.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code, when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_renders_status_and_body() {
        let err = Error::api(404, "Object Not Found");
        assert_eq!(err.to_string(), "HTTP 404: Object Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn non_api_errors_have_no_status() {
        assert_eq!(Error::validation("nope").status(), None);
    }
}
