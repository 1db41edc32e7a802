//! Auth types
//!
//! Resolved credentials for one connection, and the cached bearer token
//! produced by the token acquirer.

use chrono::{DateTime, Utc};

/// Seconds before expiry at which a cached token is treated as stale
const EXPIRY_BUFFER_SECS: i64 = 30;

/// How requests to the GraphQL endpoint are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// A static token sent as-is in the bearer header
    ApiToken(String),

    /// OAuth2 client-credentials pair exchanged for a bearer token
    ClientCredentials {
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
    },
}

impl AuthMethod {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMethod::ApiToken(_) => "api_token",
            AuthMethod::ClientCredentials { .. } => "client_credentials",
        }
    }
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::ApiToken(_) => f.debug_tuple("ApiToken").field(&"<redacted>").finish(),
            AuthMethod::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Where the winning credential came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `api_token` in the connection config
    ConfigApiToken,
    /// `client_id`/`client_secret` in the connection config (possibly completed from the environment)
    ConfigClientCredentials,
    /// `WIZ_API_TOKEN`
    EnvApiToken,
    /// `WIZ_AUTH_CLIENT_ID`/`WIZ_AUTH_CLIENT_SECRET`
    EnvClientCredentials,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CredentialSource::ConfigApiToken => "config api_token",
            CredentialSource::ConfigClientCredentials => "config client credentials",
            CredentialSource::EnvApiToken => "environment api token",
            CredentialSource::EnvClientCredentials => "environment client credentials",
        };
        write!(f, "{s}")
    }
}

/// Effective authentication material for one connection
///
/// Built once on first use of a connection and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Token or client pair
    pub method: AuthMethod,
    /// Which layer supplied `method`
    pub source: CredentialSource,
    /// GraphQL endpoint
    pub base_url: String,
    /// OAuth2 token endpoint
    pub auth_url: String,
}

impl Credentials {
    /// The static token, if this connection uses one
    pub fn api_token(&self) -> Option<&str> {
        match &self.method {
            AuthMethod::ApiToken(token) => Some(token),
            AuthMethod::ClientCredentials { .. } => None,
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(EXPIRY_BUFFER_SECS);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_inside_buffer_is_expired() {
        let token = CachedToken::expires_in("test".to_string(), 10);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_auth_method_debug_redacts() {
        let token = format!("{:?}", AuthMethod::ApiToken("tok-123".into()));
        assert!(!token.contains("tok-123"));

        let pair = format!(
            "{:?}",
            AuthMethod::ClientCredentials {
                client_id: "my-id".into(),
                client_secret: "my-secret".into(),
            }
        );
        assert!(pair.contains("my-id"));
        assert!(!pair.contains("my-secret"));
    }
}
