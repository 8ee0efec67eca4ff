//! Error handling module for the field operations console.
//!
//! Every failure is caught where the request was issued and turned into an
//! inline message for the affected panel; nothing here is fatal.

use std::fmt;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}

/// Client error type.
#[derive(Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, reset
    Network(String),
    /// The request did not complete within the configured timeout
    Timeout(String),
    /// Non-2xx response from the backend
    Http { status: u16, body: String },
    /// Response body was not the JSON we expected
    Decode(String),
    /// Invalid configuration value
    Config(String),
    /// Local file access (view preferences)
    Io(String),
    /// Request rejected before it was sent
    Validation(String),
}

impl ClientError {
    /// Get the HTTP status code for this error, if the backend answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => codes::NETWORK_ERROR,
            ClientError::Timeout(_) => codes::TIMEOUT,
            ClientError::Http { status: 401, .. } | ClientError::Http { status: 403, .. } => {
                codes::UNAUTHORIZED
            }
            ClientError::Http { status: 404, .. } => codes::NOT_FOUND,
            ClientError::Http { .. } => codes::HTTP_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
            ClientError::Io(_) => codes::IO_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Network(msg) => msg.clone(),
            ClientError::Timeout(msg) => msg.clone(),
            ClientError::Http { status, body } if body.trim().is_empty() => {
                format!("Request failed with status {}", status)
            }
            ClientError::Http { status, body } => {
                format!("Request failed with status {}: {}", status, body.trim())
            }
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Config(msg) => msg.clone(),
            ClientError::Io(msg) => msg.clone(),
            ClientError::Validation(msg) => msg.clone(),
        }
    }

    /// Message shown next to the panel whose request failed.
    ///
    /// Transport problems get a generic text; backend rejections carry the
    /// status and body when there is one.
    pub fn inline_message(&self) -> String {
        match self {
            ClientError::Network(_) | ClientError::Timeout(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            ClientError::Decode(_) => "The server sent an unexpected response.".to_string(),
            _ => self.message(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP client error: {:?}", err);
        if err.is_timeout() {
            ClientError::Timeout(format!("Request timed out: {}", err))
        } else if err.is_decode() {
            ClientError::Decode(format!("Invalid response body: {}", err))
        } else {
            ClientError::Network(format!("Network error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("IO error: {:?}", err);
        ClientError::Io(format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_codes() {
        let err = ClientError::Http {
            status: 401,
            body: String::new(),
        };
        assert_eq!(err.error_code(), codes::UNAUTHORIZED);
        assert_eq!(err.status_code(), Some(401));

        let err = ClientError::Http {
            status: 404,
            body: "no such team".to_string(),
        };
        assert_eq!(err.error_code(), codes::NOT_FOUND);
        assert_eq!(err.message(), "Request failed with status 404: no such team");

        let err = ClientError::Http {
            status: 500,
            body: "  ".to_string(),
        };
        assert_eq!(err.error_code(), codes::HTTP_ERROR);
        assert_eq!(err.message(), "Request failed with status 500");
    }

    #[test]
    fn test_inline_message_hides_transport_details() {
        let err = ClientError::Network("Network error: connection refused".to_string());
        assert_eq!(
            err.inline_message(),
            "Could not reach the server. Please try again."
        );
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_display_includes_code() {
        let err = ClientError::Validation("First name is required".to_string());
        assert_eq!(err.to_string(), "VALIDATION_ERROR: First name is required");
    }
}
