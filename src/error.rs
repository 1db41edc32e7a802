//! Error types for the Wiz connector
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Every variant maps onto one [`ErrorClass`], which is what callers branch on:
//! configuration problems, authentication failures, remote failures, and the
//! "no such resource" case that get-by-id turns into an empty result.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// The remote API has no structured error codes; a missing resource is only
/// recognisable by its message text (e.g. `Resource not found`).
static NOT_FOUND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)resource not found").expect("Invalid not-found regex")
});

/// Returns true if an error message reports that the queried resource does not exist.
///
/// This is the only place the provider's error text is interpreted. Swap it
/// out if the API ever starts returning error codes.
pub fn is_not_found_message(message: &str) -> bool {
    NOT_FOUND_REGEX.is_match(message)
}

/// The main error type for the Wiz connector
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("OAuth2 error: {message}")]
    OAuth2 { message: String },

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("graphql: {message}")]
    GraphQl { message: String },

    #[error("graphql: {message}")]
    NotFound { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or invalid configuration; raised before any network call
    Config,
    /// Token endpoint unreachable, rejected, or returned garbage
    Auth,
    /// Any other failure talking to the GraphQL endpoint
    Remote,
    /// The server reported that the requested resource does not exist
    NotFound,
    /// Local failures (I/O, CLI usage)
    Internal,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a remote error from a server message, reclassifying "not found"
    pub fn remote(message: impl Into<String>) -> Self {
        let message = message.into();
        if is_not_found_message(&message) {
            Self::NotFound { message }
        } else {
            Self::GraphQl { message }
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Which part of the error taxonomy this error belongs to
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::InvalidUrl(_) => ErrorClass::Config,
            Error::Auth { .. } | Error::OAuth2 { .. } => ErrorClass::Auth,
            Error::NotFound { .. } => ErrorClass::NotFound,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::GraphQl { .. }
            | Error::Decode { .. }
            | Error::JsonParse(_) => ErrorClass::Remote,
            Error::Io(_) | Error::FileNotFound { .. } | Error::Other(_) => ErrorClass::Internal,
        }
    }

    /// Check if the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }
}

/// Result type alias for the Wiz connector
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("url");
        assert_eq!(err.to_string(), "Missing required config field: url");

        let err = Error::http_status(502, "Bad gateway");
        assert_eq!(err.to_string(), "HTTP 502: Bad gateway");

        let err = Error::remote("Unauthorized");
        assert_eq!(err.to_string(), "graphql: Unauthorized");
    }

    #[test_case("Resource not found" ; "exact")]
    #[test_case("resource NOT FOUND: issue abc" ; "mixed case")]
    #[test_case("graphql: Resource not found for id 123" ; "embedded")]
    fn test_not_found_message_matches(message: &str) {
        assert!(is_not_found_message(message));
        assert!(Error::remote(message).is_not_found());
    }

    #[test_case("Unauthorized" ; "auth")]
    #[test_case("resource was found" ; "negated wording")]
    #[test_case("" ; "empty")]
    fn test_not_found_message_rejects(message: &str) {
        assert!(!is_not_found_message(message));
        assert_eq!(Error::remote(message).class(), ErrorClass::Remote);
    }

    #[test]
    fn test_error_class() {
        assert_eq!(Error::config("x").class(), ErrorClass::Config);
        assert_eq!(Error::missing_field("url").class(), ErrorClass::Config);
        assert_eq!(Error::auth("x").class(), ErrorClass::Auth);
        assert_eq!(Error::http_status(500, "").class(), ErrorClass::Remote);
        assert_eq!(Error::decode("x").class(), ErrorClass::Remote);
        assert_eq!(Error::Other("x".into()).class(), ErrorClass::Internal);
        assert!(!Error::http_status(404, "Not found").is_not_found());
    }
}
