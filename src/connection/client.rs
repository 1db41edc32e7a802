//! Authenticated GraphQL client for one connection

use crate::auth::{Bearer, Credentials};
use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::http::{GraphQlClient, HttpClientConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Resolved credentials plus the transport built from them
///
/// Read-only once constructed; shared by every call on the connection.
#[derive(Debug)]
pub struct WizClient {
    credentials: Credentials,
    graphql: GraphQlClient,
}

impl WizClient {
    /// Build the transport for resolved credentials
    ///
    /// With a client pair the first token is acquired here, so an auth
    /// failure surfaces from construction rather than from the first query.
    pub async fn connect(credentials: Credentials, config: &ConnectionConfig) -> Result<Self> {
        let http_config = HttpClientConfig::from_connection(config);
        let http_client = http_config.build_client()?;
        let bearer = Bearer::for_credentials(&credentials, http_client.clone());

        if matches!(bearer, Bearer::OAuth(_)) {
            debug!(auth_url = %credentials.auth_url, "Acquiring initial token");
            bearer.token().await?;
        }

        let graphql = GraphQlClient::with_client(
            http_client,
            credentials.base_url.clone(),
            bearer,
            &http_config,
        );

        info!(
            endpoint = %credentials.base_url,
            method = credentials.method.kind(),
            source = %credentials.source,
            "Connected"
        );

        Ok(Self {
            credentials,
            graphql,
        })
    }

    /// Run one query and decode `data`
    pub async fn execute<V, T>(&self, query: &str, variables: &V) -> Result<T>
    where
        V: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.graphql.execute(query, variables).await
    }

    /// Credentials this client was built from
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GraphQL endpoint
    pub fn endpoint(&self) -> &str {
        self.graphql.endpoint()
    }
}
