//! Page fetcher backed by a resource's list query

use crate::connection::WizClient;
use crate::error::{Error, Result};
use crate::filter::FilterMap;
use crate::pagination::{Connection, PageFetcher, PageRequest};
use crate::resources::ResourceDescriptor;
use crate::types::JsonObject;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Variables of a list call
#[derive(Debug, Serialize)]
struct ListVariables<'a> {
    first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a FilterMap>,
}

/// Fetches pages of one resource through a connected client
pub struct ResourceFetcher<T> {
    client: Arc<WizClient>,
    descriptor: ResourceDescriptor,
    /// `Some` exactly when the list query declares `$filter`
    filter: Option<FilterMap>,
    _record: PhantomData<fn() -> T>,
}

impl<T> ResourceFetcher<T> {
    /// Create a fetcher; `filter` is dropped for resources without filterable fields
    pub fn new(client: Arc<WizClient>, descriptor: ResourceDescriptor, filter: FilterMap) -> Self {
        let filter = descriptor.has_filters().then_some(filter);
        Self {
            client,
            descriptor,
            filter,
            _record: PhantomData,
        }
    }

    /// Filter sent with every page
    pub fn filter(&self) -> Option<&FilterMap> {
        self.filter.as_ref()
    }
}

#[async_trait]
impl<T> PageFetcher for ResourceFetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Record = T;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Connection<T>> {
        let variables = ListVariables {
            first: request.first,
            after: request.after.as_deref(),
            filter: self.filter.as_ref(),
        };

        let mut data: JsonObject = self
            .client
            .execute(self.descriptor.list_query, &variables)
            .await?;

        let root = self.descriptor.list_root;
        let connection = data
            .remove(root)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::decode(format!("response has no '{root}' connection")))?;

        let page: Connection<T> = serde_json::from_value(connection)
            .map_err(|e| Error::decode(format!("{}: {e}", self.descriptor.name)))?;

        debug!(
            resource = self.descriptor.name,
            records = page.nodes.len(),
            "Decoded page"
        );
        Ok(page)
    }
}
