//! Credential resolution
//!
//! Precedence, highest first:
//!
//! 1. `api_token` in config
//! 2. `client_id`/`client_secret` in config, each completed from the environment if unset
//! 3. `WIZ_API_TOKEN`
//! 4. `WIZ_AUTH_CLIENT_ID`/`WIZ_AUTH_CLIENT_SECRET`
//!
//! The endpoints follow the same config-then-environment order, with a fixed
//! default for the token endpoint.

use super::types::{AuthMethod, CredentialSource, Credentials};
use crate::config::{
    ConnectionConfig, EnvSnapshot, DEFAULT_AUTH_URL, ENV_API_TOKEN, ENV_AUTH_URL, ENV_CLIENT_ID,
    ENV_CLIENT_SECRET, ENV_URL,
};
use crate::error::{Error, Result};
use crate::types::Setting;
use tracing::debug;
use url::Url;

/// Resolve the effective credentials for a connection
///
/// Pure function of its inputs; fails before any network activity when no
/// usable credential or no base URL can be found.
pub fn resolve(config: &ConnectionConfig, env: &EnvSnapshot) -> Result<Credentials> {
    let base_url = config
        .url
        .setting()
        .or_else(|| env.get(ENV_URL))
        .ok_or_else(|| Error::missing_field("url"))?;
    Url::parse(&base_url)?;

    let auth_url = config
        .auth_url
        .setting()
        .or_else(|| env.get(ENV_AUTH_URL))
        .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
    Url::parse(&auth_url).map_err(|e| Error::invalid_value("auth_url", e.to_string()))?;

    let (method, source) = resolve_method(config, env)?;
    debug!(source = %source, method = method.kind(), "Resolved credentials");

    Ok(Credentials {
        method,
        source,
        base_url,
        auth_url,
    })
}

fn resolve_method(
    config: &ConnectionConfig,
    env: &EnvSnapshot,
) -> Result<(AuthMethod, CredentialSource)> {
    if let Some(token) = config.api_token.setting() {
        return Ok((AuthMethod::ApiToken(token), CredentialSource::ConfigApiToken));
    }

    let config_id = config.client_id.setting();
    let config_secret = config.client_secret.setting();
    if config_id.is_some() || config_secret.is_some() {
        let client_id = config_id.or_else(|| env.get(ENV_CLIENT_ID));
        let client_secret = config_secret.or_else(|| env.get(ENV_CLIENT_SECRET));
        if let (Some(client_id), Some(client_secret)) = (client_id, client_secret) {
            return Ok((
                AuthMethod::ClientCredentials {
                    client_id,
                    client_secret,
                },
                CredentialSource::ConfigClientCredentials,
            ));
        }
    }

    if let Some(token) = env.get(ENV_API_TOKEN) {
        return Ok((AuthMethod::ApiToken(token), CredentialSource::EnvApiToken));
    }

    if let (Some(client_id), Some(client_secret)) =
        (env.get(ENV_CLIENT_ID), env.get(ENV_CLIENT_SECRET))
    {
        return Ok((
            AuthMethod::ClientCredentials {
                client_id,
                client_secret,
            },
            CredentialSource::EnvClientCredentials,
        ));
    }

    Err(Error::config(
        "no usable credentials: set api_token, or both client_id and client_secret",
    ))
}
