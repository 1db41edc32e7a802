//! Bearer header injection

use super::acquirer::TokenAcquirer;
use super::types::{AuthMethod, Credentials};
use crate::error::Result;
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;

/// Supplies the bearer token attached to every GraphQL request
#[derive(Clone)]
pub enum Bearer {
    /// A static API token
    Static(String),
    /// A token obtained (and cached) by an OAuth2 acquirer
    OAuth(Arc<TokenAcquirer>),
}

impl Bearer {
    /// Build the bearer for resolved credentials, sharing `http_client` with the acquirer
    pub fn for_credentials(credentials: &Credentials, http_client: Client) -> Self {
        match &credentials.method {
            AuthMethod::ApiToken(token) => Bearer::Static(token.clone()),
            AuthMethod::ClientCredentials {
                client_id,
                client_secret,
            } => Bearer::OAuth(Arc::new(TokenAcquirer::with_client(
                credentials.auth_url.clone(),
                client_id.clone(),
                client_secret.clone(),
                http_client,
            ))),
        }
    }

    /// Current token value
    pub async fn token(&self) -> Result<String> {
        match self {
            Bearer::Static(token) => Ok(token.clone()),
            Bearer::OAuth(acquirer) => acquirer.token().await,
        }
    }

    /// Apply the `Authorization: Bearer` header to a request
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token().await?;
        Ok(req.bearer_auth(token))
    }
}

impl std::fmt::Debug for Bearer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bearer::Static(_) => f.debug_tuple("Static").field(&"<redacted>").finish(),
            Bearer::OAuth(acquirer) => f.debug_tuple("OAuth").field(acquirer).finish(),
        }
    }
}
