//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Server              │ │
//! │  │  (ConfigError)  │  │                 │  │                         │ │
//! │  │  Io / Parse     │  │  Http (reqwest) │  │  Api { status, message }│ │
//! │  │  Invalid        │  │  InvalidUrl     │  │  InvalidResponse        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │  Before sending │   A body that fails form validation is never sent. │
//! │  │  Validation     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use smartstock_core::closure::is_already_closed_message;
use smartstock_core::ValidationError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Anything that can go wrong talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, timeout, TLS failure.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status. `message` is the body's `error` or `message` field, or
    /// `HTTP error {status}` when the body has neither.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 2xx whose body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A request URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Form validation failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// HTTP status of a server-side refusal.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server refused because a closure already exists for the
    /// date.
    pub fn is_already_closed(&self) -> bool {
        matches!(self, ClientError::Api { message, .. } if is_already_closed_message(message))
    }

    /// The text shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(e) => e.to_string(),
            ClientError::Http(e) if e.is_timeout() => {
                "The server did not respond in time".to_string()
            }
            ClientError::Http(_) => "Could not reach the SmartStock server".to_string(),
            ClientError::InvalidResponse(_) => "Unexpected response from the server".to_string(),
            ClientError::InvalidUrl(_) => "The server address is misconfigured".to_string(),
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors while loading or validating `smartstock.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_closed_detection() {
        let err = ClientError::Api {
            status: 400,
            message: "Ya existe un cierre para esta fecha".to_string(),
        };
        assert!(err.is_already_closed());
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message(), "Ya existe un cierre para esta fecha");

        let err = ClientError::Api {
            status: 403,
            message: "No tienes permisos para cerrar caja".to_string(),
        };
        assert!(!err.is_already_closed());
    }

    #[test]
    fn test_validation_user_message() {
        let err: ClientError = ValidationError::required("name").into();
        assert_eq!(err.user_message(), "name is required");
        assert!(!err.is_already_closed());
    }
}
