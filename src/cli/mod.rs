//! CLI module
//!
//! A thin query host over the engine.
//!
//! # Commands
//!
//! - `check` - Resolve credentials and authenticate
//! - `resources` - List resources and their filterable columns
//! - `list` - Stream records as JSON lines
//! - `get` - Fetch one record by id

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
