//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::settings::{Settings, GRAPHITE_URL_VAR};
use crate::sources::{DatapointSource, SourceRegistry};
use crate::transport::HttpTransport;
use crate::types::{CiStatus, DatapointSeries, StringMap, TargetQuery};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
    registry: SourceRegistry,
}

impl Runner {
    /// Create a runner with the built-in adapters, configured from the
    /// environment
    pub fn new(cli: Cli) -> Self {
        let settings = Settings::from_env();
        let registry = SourceRegistry::builtin(&settings, Arc::new(HttpTransport::new()));
        Self { cli, registry }
    }

    /// Create a runner over a prepared registry
    pub fn with_registry(cli: Cli, registry: SourceRegistry) -> Self {
        Self { cli, registry }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::BuildStatus {
                server_url,
                project,
            } => self.build_status(server_url, project).await,
            Commands::Datapoints { targets, from, to } => {
                self.datapoints(targets, from.as_deref(), to.as_deref()).await
            }
            Commands::Targets { pattern, limit } => {
                self.targets(pattern.clone(), *limit).await
            }
            Commands::Sources => self.sources(),
        }
    }

    async fn build_status(&self, server_url: &str, project: &str) -> Result<()> {
        let source = self
            .registry
            .ci_source("jenkins")
            .ok_or_else(|| Error::config("no CI source registered under 'jenkins'"))?;

        let mut config = StringMap::new();
        config.insert("server_url".to_string(), server_url.to_string());
        config.insert("project".to_string(), project.to_string());

        let status = source.get(&config).await?;
        self.print_build_status(&status)
    }

    async fn datapoints(
        &self,
        targets: &[String],
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<()> {
        let source = self.graphite()?;

        let to = parse_timestamp(to, "--to", Utc::now)?;
        let from = parse_timestamp(from, "--from", || to - Duration::hours(1))?;

        let series = source.get(targets, from, to).await?;
        self.print_series(&series)
    }

    async fn targets(&self, pattern: Option<String>, limit: Option<usize>) -> Result<()> {
        let source = self.graphite()?;

        let query = TargetQuery { pattern, limit };
        let targets = source.available_targets(&query).await?;

        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&targets)?),
            OutputFormat::Pretty => {
                for target in &targets {
                    println!("{target}");
                }
                println!("({} targets)", targets.len());
            }
        }
        Ok(())
    }

    fn sources(&self) -> Result<()> {
        let datapoints: Vec<_> = self
            .registry
            .datapoint_source_names()
            .into_iter()
            .map(|name| {
                let source = self
                    .registry
                    .datapoint_source(name)
                    .expect("name came from the registry");
                json!({
                    "name": name,
                    "kind": "datapoints",
                    "available": source.available(),
                    "supports_target_browsing": source.supports_target_browsing(),
                    "supports_functions": source.supports_functions(),
                })
            })
            .collect();

        let ci: Vec<_> = self
            .registry
            .ci_source_names()
            .into_iter()
            .map(|name| {
                let source = self
                    .registry
                    .ci_source(name)
                    .expect("name came from the registry");
                json!({
                    "name": name,
                    "kind": "ci",
                    "fields": source.fields(),
                })
            })
            .collect();

        let listing = json!({ "datapoints": datapoints, "ci": ci });

        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
            OutputFormat::Pretty => {
                for entry in datapoints.iter().chain(ci.iter()) {
                    println!("{entry}");
                }
            }
        }
        Ok(())
    }

    fn graphite(&self) -> Result<Arc<dyn DatapointSource>> {
        let source = self
            .registry
            .datapoint_source("graphite")
            .ok_or_else(|| Error::config("no datapoint source registered under 'graphite'"))?;

        if !source.available() {
            return Err(Error::config(format!(
                "graphite url is not configured (set {GRAPHITE_URL_VAR})"
            )));
        }

        Ok(source)
    }

    fn print_build_status(&self, status: &CiStatus) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(status)?),
            OutputFormat::Pretty => {
                println!("label:             {}", status.label.as_deref().unwrap_or("-"));
                println!(
                    "last build time:   {}",
                    status.last_build_time.as_deref().unwrap_or("-")
                );
                println!("last build status: {:?}", status.last_build_status);
                println!("current status:    {:?}", status.current_status);
            }
        }
        Ok(())
    }

    fn print_series(&self, series: &DatapointSeries) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(series)?),
            OutputFormat::Pretty => {
                for entry in series {
                    println!("{} ({} datapoints)", entry.target, entry.datapoints.len());
                }
            }
        }
        Ok(())
    }
}

/// Parse an optional RFC 3339 timestamp, falling back to `default`
fn parse_timestamp<F>(value: Option<&str>, flag: &str, default: F) -> Result<DateTime<Utc>>
where
    F: FnOnce() -> DateTime<Utc>,
{
    match value {
        None => Ok(default()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| Error::config(format!("invalid {flag} timestamp '{raw}': {e}"))),
    }
}
