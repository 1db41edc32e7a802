//! Connection module
//!
//! A [`Connection`] names one logical Wiz tenant and carries its config.
//! [`ConnectionCache`] turns it into a ready [`WizClient`] on first use and
//! hands the same client to every later call on that name.

mod cache;
mod client;

pub use cache::ConnectionCache;
pub use client::WizClient;

use crate::config::ConnectionConfig;

/// A named connection and the configuration it was declared with
///
/// The name is the cache key. Two connections with the same name share one
/// client even if their configs differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Logical identity
    pub name: String,
    /// Declared configuration
    pub config: ConnectionConfig,
}

impl Connection {
    /// Create a connection
    pub fn new(name: impl Into<String>, config: ConnectionConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

#[cfg(test)]
mod tests;
