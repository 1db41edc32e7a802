//! OAuth2 client-credentials token acquisition
//!
//! Exchanges a client id/secret for a bearer token and caches it. Refresh
//! happens under the cache's write lock, so concurrent callers share one
//! token request.

use super::types::CachedToken;
use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Audience requested in every token grant
pub const AUDIENCE: &str = "wiz-api";

/// Acquires and caches bearer tokens for one connection
pub struct TokenAcquirer {
    /// Token endpoint
    auth_url: String,
    client_id: String,
    client_secret: String,
    /// Cached token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl TokenAcquirer {
    /// Create an acquirer with a default HTTP client
    pub fn new(
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self::with_client(auth_url, client_id, client_secret, Client::new())
    }

    /// Create an acquirer sharing an existing HTTP client
    pub fn with_client(
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Get a valid token, acquiring one if none is cached or the cached one is stale
    pub async fn token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    async fn fetch_new_token(&self) -> Result<CachedToken> {
        debug!(auth_url = %self.auth_url, "Requesting access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("audience", AUDIENCE),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.auth_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::auth(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::auth(format!("failed to read token response: {e}")))?;

        if status != StatusCode::OK {
            return Err(Error::OAuth2 {
                message: format!("token request failed with status {}: {body}", status.as_u16()),
            });
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("invalid token response: {e}")))?;
        if token_response.access_token.is_empty() {
            return Err(Error::auth("token response has an empty access_token"));
        }

        debug!(
            expires_in = ?token_response.expires_in,
            "Access token acquired"
        );
        Ok(token_response.into_cached_token())
    }

    /// Drop the cached token so the next call re-acquires
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// The token endpoint this acquirer talks to
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }
}

impl std::fmt::Debug for TokenAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAcquirer")
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}
