//! Connection configuration
//!
//! A connection is configured from a YAML (or JSON) document and falls back to
//! environment variables for any field left unset. The environment is read
//! once into an [`EnvSnapshot`] so that credential resolution stays a pure
//! function of its inputs.

use crate::error::{Error, Result};
use crate::types::Setting;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable holding a static API token
pub const ENV_API_TOKEN: &str = "WIZ_API_TOKEN";
/// Environment variable holding the OAuth2 client id
pub const ENV_CLIENT_ID: &str = "WIZ_AUTH_CLIENT_ID";
/// Environment variable holding the OAuth2 client secret
pub const ENV_CLIENT_SECRET: &str = "WIZ_AUTH_CLIENT_SECRET";
/// Environment variable holding the GraphQL endpoint
pub const ENV_URL: &str = "WIZ_URL";
/// Environment variable holding the token endpoint
pub const ENV_AUTH_URL: &str = "WIZ_AUTH_URL";

/// Every variable the connector reads from the environment
pub const ENV_VARS: [&str; 5] = [
    ENV_API_TOKEN,
    ENV_CLIENT_ID,
    ENV_CLIENT_SECRET,
    ENV_URL,
    ENV_AUTH_URL,
];

/// Token endpoint used when neither config nor environment names one
pub const DEFAULT_AUTH_URL: &str = "https://auth.app.wiz.io/oauth/token";

// ============================================================================
// Connection Config
// ============================================================================

/// Configuration for one logical connection
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Static API token; takes precedence over client credentials
    #[serde(default)]
    pub api_token: Option<String>,

    /// OAuth2 client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// GraphQL endpoint (e.g. `https://api.us17.app.wiz.io/graphql`)
    #[serde(default)]
    pub url: Option<String>,

    /// OAuth2 token endpoint
    #[serde(default)]
    pub auth_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Client-side request throttle; unset means unthrottled
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

impl ConnectionConfig {
    /// Create an empty config (everything comes from the environment)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GraphQL endpoint
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set a static API token
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the OAuth2 client credentials
    #[must_use]
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the token endpoint
    #[must_use]
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the client-side request throttle
    #[must_use]
    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = Some(rps);
        self
    }

    /// Parse a config from a YAML (or JSON) string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("url", &self.url)
            .field("auth_url", &self.auth_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

// ============================================================================
// Environment Snapshot
// ============================================================================

/// A frozen view of the environment variables the connector cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// An empty environment
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the relevant variables from the process environment
    pub fn from_process() -> Self {
        let vars = ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| ((*name).to_string(), v)))
            .collect();
        Self { vars }
    }

    /// Add or replace a variable
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Look up a variable; blank values count as unset
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).map(String::as_str).setting()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
