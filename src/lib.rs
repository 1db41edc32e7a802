// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Wiz Connector
//!
//! A read-only connector that exposes Wiz security-graph resources as lazy,
//! filterable record streams for a query host.
//!
//! ## Features
//!
//! - **Credential precedence**: config API token, config client pair, env token, env client pair
//! - **OAuth2 client credentials**: single-flight token acquisition with expiry-aware caching
//! - **Predicate push-down**: `=`, `<>` and timestamp ranges translated into GraphQL filter arguments
//! - **Cursor pagination**: page size capped per resource, early stop after any record
//! - **Typed resources**: one statically known record type per resource
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use std::sync::Arc;
//! use wiz_connector::connection::{Connection, ConnectionCache};
//! use wiz_connector::engine::{Engine, ListRequest};
//! use wiz_connector::filter::Qualifier;
//! use wiz_connector::resources::Issues;
//! use wiz_connector::{ConnectionConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConnectionConfig::new()
//!         .with_url("https://api.us17.app.wiz.io/graphql")
//!         .with_client_credentials("client-id", "client-secret");
//!
//!     let cache = Arc::new(ConnectionCache::new());
//!     let engine = Engine::new(cache, Connection::new("prod", config));
//!
//!     let request = ListRequest::new()
//!         .qualifier(Qualifier::eq("severity", "CRITICAL"))
//!         .limit(100);
//!
//!     let mut issues = engine.list::<Issues>(request).await?;
//!     while let Some(issue) = issues.next().await {
//!         println!("{}", issue?.id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Engine                               │
//! │   list::<R>(request) → Stream<R::Record>   get::<R>(id) → Option│
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Filter  │   Pager   │  Connection   │   HTTP    │    Auth     │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Text     │ Cursor    │ Cache         │ GraphQL   │ Resolver    │
//! │ Bool/<>  │ Limit     │ Single-flight │ No-cache  │ OAuth2      │
//! │ Ranges   │ Stop      │               │ Rate Limit│ Token cache │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connection configuration and environment fallback
pub mod config;

/// Credential resolution and token acquisition
pub mod auth;

/// GraphQL transport with rate limiting
pub mod http;

/// Qualifier to filter-argument translation
pub mod filter;

/// Cursor pagination
pub mod pagination;

/// Per-connection client cache
pub mod connection;

/// Resource descriptors and record types
pub mod resources;

/// List/get engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorClass, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ConnectionConfig, EnvSnapshot};
pub use connection::{Connection, ConnectionCache};
pub use engine::{Engine, ListRequest};
pub use filter::Qualifier;
pub use resources::{Resource, ResourceKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
