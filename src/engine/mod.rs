//! Query engine
//!
//! Ties the pieces together for one connection:
//! - `list` translates qualifiers, builds a pager over the resource's list
//!   query and returns a lazy record stream
//! - `list_pages` is the same run exposed page by page
//! - `get` fetches one record by id, mapping "not found" to `None`
//!
//! The connection's client is built through the shared [`ConnectionCache`]
//! on first use.

mod fetcher;
mod types;

pub use fetcher::ResourceFetcher;
pub use types::ListRequest;

use crate::connection::{Connection, ConnectionCache, WizClient};
use crate::error::{Error, Result};
use crate::filter;
use crate::pagination::{PageStream, Pager, RecordStream};
use crate::resources::{
    CloudConfigRules, ConfigurationFindings, Controls, Issues, Projects, Resource,
    ResourceDescriptor, ResourceKind, SecurityCategories, SecurityFrameworks, ServiceAccounts,
    Subscriptions, UserRoles, Users,
};
use crate::types::{JsonObject, JsonValue};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Runs `$body` with `$r` bound to the resource type behind `$kind`
macro_rules! with_resource {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            ResourceKind::Project => {
                type $r = Projects;
                $body
            }
            ResourceKind::ConfigurationFinding => {
                type $r = ConfigurationFindings;
                $body
            }
            ResourceKind::Control => {
                type $r = Controls;
                $body
            }
            ResourceKind::Issue => {
                type $r = Issues;
                $body
            }
            ResourceKind::User => {
                type $r = Users;
                $body
            }
            ResourceKind::ServiceAccount => {
                type $r = ServiceAccounts;
                $body
            }
            ResourceKind::Subscription => {
                type $r = Subscriptions;
                $body
            }
            ResourceKind::SecurityFramework => {
                type $r = SecurityFrameworks;
                $body
            }
            ResourceKind::SecurityCategory => {
                type $r = SecurityCategories;
                $body
            }
            ResourceKind::CloudConfigRule => {
                type $r = CloudConfigRules;
                $body
            }
            ResourceKind::UserRole => {
                type $r = UserRoles;
                $body
            }
        }
    };
}

/// List/get entry point for one connection
#[derive(Debug, Clone)]
pub struct Engine {
    cache: Arc<ConnectionCache>,
    connection: Connection,
}

impl Engine {
    /// Create an engine for `connection`, sharing `cache` with other engines
    pub fn new(cache: Arc<ConnectionCache>, connection: Connection) -> Self {
        Self { cache, connection }
    }

    /// The connection this engine queries
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Connected client, built on first use
    pub async fn client(&self) -> Result<Arc<WizClient>> {
        self.cache.get_or_create(&self.connection).await
    }

    // ========================================================================
    // Typed API
    // ========================================================================

    /// Stream the records of `R` matching `request`
    ///
    /// Credential and connection errors are returned before the stream is
    /// created; remote errors arrive as the stream's last item.
    pub async fn list<R: Resource>(&self, request: ListRequest) -> Result<RecordStream<R::Record>> {
        Ok(self.pager::<R::Record>(R::DESCRIPTOR, request).await?.records())
    }

    /// Stream whole pages of `R`, exposing `endCursor` for resumption
    pub async fn list_pages<R: Resource>(
        &self,
        request: ListRequest,
    ) -> Result<PageStream<R::Record>> {
        Ok(self.pager::<R::Record>(R::DESCRIPTOR, request).await?.pages())
    }

    /// Fetch one record of `R` by id
    ///
    /// An empty id and an id the server reports as missing both yield `None`.
    pub async fn get<R: Resource>(&self, id: &str) -> Result<Option<R::Record>> {
        self.get_with(R::DESCRIPTOR, id).await
    }

    // ========================================================================
    // Catalogue API
    // ========================================================================

    /// [`Engine::list`] for a resource chosen at runtime, records as JSON
    pub async fn list_values(
        &self,
        kind: ResourceKind,
        request: ListRequest,
    ) -> Result<RecordStream<JsonValue>> {
        with_resource!(kind, R => {
            let records = self.list::<R>(request).await?;
            Ok(to_values(records))
        })
    }

    /// [`Engine::get`] for a resource chosen at runtime, record as JSON
    pub async fn get_value(&self, kind: ResourceKind, id: &str) -> Result<Option<JsonValue>> {
        with_resource!(kind, R => {
            match self.get::<R>(id).await? {
                Some(record) => Ok(Some(serde_json::to_value(record)?)),
                None => Ok(None),
            }
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn pager<T>(
        &self,
        descriptor: ResourceDescriptor,
        request: ListRequest,
    ) -> Result<Pager<ResourceFetcher<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let filter = filter::translate(&request.qualifiers, descriptor.filters);
        let client = self.client().await?;

        debug!(
            resource = descriptor.name,
            filters = filter.len(),
            limit = ?request.limit,
            "Listing"
        );

        let fetcher = ResourceFetcher::new(client, descriptor, filter);
        Ok(Pager::new(fetcher, descriptor.max_page_size)
            .limit(request.limit)
            .starting_after(request.after)
            .stop_signal(request.stop))
    }

    async fn get_with<T>(&self, descriptor: ResourceDescriptor, id: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let (Some(query), Some(root)) = (descriptor.get_query, descriptor.get_root) else {
            return Err(Error::invalid_value(
                "resource",
                format!("{} does not support get by id", descriptor.name),
            ));
        };

        if id.is_empty() {
            debug!(resource = descriptor.name, "Empty id, skipping request");
            return Ok(None);
        }

        let client = self.client().await?;
        let mut data: JsonObject = match client.execute(query, &json!({ "id": id })).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                debug!(resource = descriptor.name, id, "Not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match data.remove(root) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| Error::decode(format!("{}: {e}", descriptor.name))),
        }
    }
}

fn to_values<T>(records: RecordStream<T>) -> RecordStream<JsonValue>
where
    T: Serialize + Send + 'static,
{
    Box::pin(records.map(|record| record.and_then(|r| Ok(serde_json::to_value(r)?))))
}

#[cfg(test)]
mod tests;
