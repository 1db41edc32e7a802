//! Per-connection client cache
//!
//! Keyed by connection name. Each slot is a `OnceCell`, so concurrent first
//! use of a name runs credential resolution and token acquisition once while
//! the other callers wait for the result. A failed initialisation leaves the
//! slot empty and the next call tries again.

use super::client::WizClient;
use super::Connection;
use crate::auth;
use crate::config::EnvSnapshot;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

type Slot = Arc<OnceCell<Arc<WizClient>>>;

/// Process-lifetime registry of connected clients
#[derive(Debug)]
pub struct ConnectionCache {
    env: EnvSnapshot,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ConnectionCache {
    /// A cache that falls back to the current process environment
    pub fn new() -> Self {
        Self::with_env(EnvSnapshot::from_process())
    }

    /// A cache resolving credentials against a fixed environment
    pub fn with_env(env: EnvSnapshot) -> Self {
        Self {
            env,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the client for `connection`, building it on first use
    pub async fn get_or_create(&self, connection: &Connection) -> Result<Arc<WizClient>> {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(connection.name.clone()).or_default())
        };

        let client = slot
            .get_or_try_init(|| async {
                debug!(connection = %connection.name, "Creating client");
                let credentials = auth::resolve(&connection.config, &self.env)?;
                let client = WizClient::connect(credentials, &connection.config).await?;
                Ok::<_, crate::error::Error>(Arc::new(client))
            })
            .await?;

        Ok(Arc::clone(client))
    }

    /// Whether a client has been built for `name`
    pub async fn contains(&self, name: &str) -> bool {
        self.slots
            .lock()
            .await
            .get(name)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of connected clients
    pub async fn len(&self) -> usize {
        self.slots
            .lock()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Whether no client has been built yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ConnectionCache {
    fn default() -> Self {
        Self::new()
    }
}
