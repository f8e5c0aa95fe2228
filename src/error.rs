//! Console error kinds
//!
//! None of these are fatal: each one ends up in the status area of the
//! operation that produced it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A required field was empty; no request was sent
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-2xx status
    #[error("{status} {status_text}")]
    Server {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a usable response
    #[error("request failed: {0}")]
    Transport(String),
}

/// Failure below the HTTP layer (connect, DNS, timeout, body read)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ConsoleError {
    fn from(err: TransportError) -> Self {
        ConsoleError::Transport(err.0)
    }
}

impl ConsoleError {
    pub fn validation(message: &str) -> Self {
        ConsoleError::Validation(message.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }

    /// Status text including the server body, used by operations whose
    /// responses are opaque text (create, delete, scale)
    pub fn with_body(&self) -> String {
        match self {
            ConsoleError::Server {
                status,
                status_text,
                body,
            } => format!("{} {}\n{}", status, status_text, body),
            other => other.to_string(),
        }
    }
}

pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ConsoleError::Server {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "500 Internal Server Error");
        assert_eq!(err.with_body(), "500 Internal Server Error\nboom");
    }

    #[test]
    fn test_transport_error_display() {
        let err: ConsoleError = TransportError("timeout".to_string()).into();
        assert_eq!(err.to_string(), "request failed: timeout");
        assert_eq!(err.with_body(), "request failed: timeout");
    }
}
