//! GraphQL transport client
//!
//! One request/response cycle per call:
//! - throttles through the optional rate limiter
//! - injects `Cache-Control: no-cache` and the bearer header
//! - records latency
//! - decodes the envelope into the caller's type
//!
//! Failures are returned as-is. There is no retry loop.

use super::graphql::{GraphQlRequest, GraphQlResponse};
use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Bearer;
use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for the HTTP layer
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration; `None` disables throttling
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: None,
            user_agent: format!("wiz-connector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Transport settings carried by a connection config
    pub fn from_connection(config: &ConnectionConfig) -> Self {
        let mut builder = Self::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = config
            .requests_per_second
            .and_then(RateLimiterConfig::per_second)
        {
            builder = builder.rate_limit(limit);
        }
        builder.build()
    }

    /// Build the underlying reqwest client
    pub fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Executes GraphQL queries against one endpoint
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
    bearer: Bearer,
    rate_limiter: Option<RateLimiter>,
}

impl GraphQlClient {
    /// Create a client with its own reqwest client
    pub fn new(endpoint: impl Into<String>, bearer: Bearer, config: &HttpClientConfig) -> Result<Self> {
        let client = config.build_client()?;
        Ok(Self::with_client(client, endpoint, bearer, config))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        bearer: Bearer,
        config: &HttpClientConfig,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            bearer,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        }
    }

    /// Run one query and decode `data` into `T`
    pub async fn execute<V, T>(&self, query: &str, variables: &V) -> Result<T>
    where
        V: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_raw(query, variables).await?.into_data()
    }

    /// Run one query and return the undecoded envelope
    ///
    /// HTTP failures without a GraphQL body become `HttpStatus`; a body that
    /// carries `errors` is returned so the caller can classify them.
    pub async fn execute_raw<V>(&self, query: &str, variables: &V) -> Result<GraphQlResponse>
    where
        V: Serialize + ?Sized,
    {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let req = self
            .client
            .post(&self.endpoint)
            .header(CACHE_CONTROL, "no-cache")
            .json(&GraphQlRequest { query, variables });
        let req = self.bearer.apply(req).await?;

        let start = Instant::now();
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        debug!(elapsed_ms, status = status.as_u16(), "graphql.time");

        match serde_json::from_slice::<GraphQlResponse>(&body) {
            Ok(envelope) if envelope.error_message().is_some() || status.is_success() => {
                Ok(envelope)
            }
            Ok(_) => Err(Error::http_status(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            )),
            Err(_) if !status.is_success() => Err(Error::http_status(
                status.as_u16(),
                String::from_utf8_lossy(&body),
            )),
            Err(e) => Err(Error::decode(format!("invalid GraphQL response: {e}"))),
        }
    }

    /// The GraphQL endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("endpoint", &self.endpoint)
            .field("bearer", &self.bearer)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
