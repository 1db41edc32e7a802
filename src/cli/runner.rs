//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ConnectionConfig, EnvSnapshot};
use crate::connection::{Connection, ConnectionCache};
use crate::engine::{Engine, ListRequest};
use crate::error::Result;
use crate::filter::Qualifier;
use crate::resources::ResourceKind;
use futures::StreamExt;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    env: EnvSnapshot,
}

impl Runner {
    /// Create a runner that falls back to the process environment
    pub fn new(cli: Cli) -> Self {
        Self::with_env(cli, EnvSnapshot::from_process())
    }

    /// Create a runner with a fixed environment
    pub fn with_env(cli: Cli, env: EnvSnapshot) -> Self {
        Self { cli, env }
    }

    /// Run the CLI command, printing to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_with(&mut std::io::stdout()).await
    }

    /// Run the CLI command, writing output to `out`
    pub async fn run_with<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check(out).await,
            Commands::Resources => self.resources(out),
            Commands::List {
                resource,
                filters,
                limit,
                after,
            } => {
                self.list(out, resource, filters, *limit, after.clone())
                    .await
            }
            Commands::Get { resource, id } => self.get(out, resource, id).await,
        }
    }

    /// Load the connection config; an absent file means environment only
    fn load_config(&self) -> Result<ConnectionConfig> {
        match &self.cli.config {
            Some(path) => ConnectionConfig::from_file(path),
            None => Ok(ConnectionConfig::new()),
        }
    }

    fn engine(&self) -> Result<Engine> {
        let config = self.load_config()?;
        let cache = Arc::new(ConnectionCache::with_env(self.env.clone()));
        Ok(Engine::new(
            cache,
            Connection::new(self.cli.connection.clone(), config),
        ))
    }

    /// Resolve credentials and authenticate
    async fn check<W: Write>(&self, out: &mut W) -> Result<()> {
        let client = self.engine()?.client().await?;
        self.output_message(
            out,
            &json!({
                "type": "CONNECTION_STATUS",
                "status": "SUCCEEDED",
                "endpoint": client.endpoint(),
                "auth_method": client.credentials().method.kind(),
                "credential_source": client.credentials().source.to_string(),
            }),
        )
    }

    /// Describe the catalogue
    fn resources<W: Write>(&self, out: &mut W) -> Result<()> {
        for kind in ResourceKind::ALL {
            let descriptor = kind.descriptor();
            let filters: Vec<Value> = descriptor
                .filters
                .iter()
                .map(|f| {
                    json!({
                        "column": f.column,
                        "argument": f.argument,
                        "kind": f.kind.as_str(),
                        "operators": f.operators().iter().map(|op| op.as_str()).collect::<Vec<_>>(),
                    })
                })
                .collect();

            self.output_message(
                out,
                &json!({
                    "type": "RESOURCE",
                    "name": descriptor.name,
                    "description": descriptor.description,
                    "max_page_size": descriptor.max_page_size,
                    "supports_get": descriptor.supports_get(),
                    "filters": filters,
                }),
            )?;
        }
        Ok(())
    }

    /// Stream records as JSON lines
    async fn list<W: Write>(
        &self,
        out: &mut W,
        resource: &str,
        filters: &[String],
        limit: Option<u64>,
        after: Option<String>,
    ) -> Result<()> {
        let kind: ResourceKind = resource.parse()?;
        let qualifiers = filters
            .iter()
            .map(|f| Qualifier::parse(f))
            .collect::<Result<Vec<_>>>()?;

        let mut request = ListRequest::new().qualifiers(qualifiers);
        request.limit = limit;
        request.after = after;

        let mut records = self.engine()?.list_values(kind, request).await?;
        let mut count = 0u64;
        while let Some(record) = records.next().await {
            self.output_message(out, &record?)?;
            count += 1;
        }

        info!(resource = kind.name(), records = count, "List complete");
        Ok(())
    }

    /// Print one record, or nothing when it does not exist
    async fn get<W: Write>(&self, out: &mut W, resource: &str, id: &str) -> Result<()> {
        let kind: ResourceKind = resource.parse()?;
        match self.engine()?.get_value(kind, id).await? {
            Some(record) => self.output_message(out, &record),
            None => {
                info!(resource = kind.name(), id, "No record");
                Ok(())
            }
        }
    }

    /// Output a message
    fn output_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}
