//! HTTP transport module
//!
//! Provides the GraphQL client used for every list and get call.
//!
//! # Features
//!
//! - **Headers**: `Cache-Control: no-cache` plus the connection's bearer token
//! - **Latency**: every request is timed and logged as `graphql.time`
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Envelope decoding**: `errors` are surfaced before `data` is decoded

mod client;
mod graphql;
mod rate_limit;

pub use client::{GraphQlClient, HttpClientConfig, HttpClientConfigBuilder};
pub use graphql::{GraphQlError, GraphQlRequest, GraphQlResponse};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
