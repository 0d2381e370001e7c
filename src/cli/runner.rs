//! CLI runner - executes commands

use crate::blueprint::{load_blueprints, validate, BlueprintRegistry, ValidationReport};
use crate::cli::commands::{Cli, Commands};
use crate::client::CargClient;
use crate::config::ConnectorConfig;
use crate::error::{Error, Result};
use crate::mapping::{
    load_mapping, DirectMapper, MappingConfig, NormalizedObject, ObjectMapper, SpecMapper,
};
use crate::output::write_objects;
use crate::sync::Connector;
use crate::types::ResourceKind;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, returning the process exit code
    pub async fn run(&self) -> Result<i32> {
        match &self.cli.command {
            Commands::Extract {
                kind,
                output,
                save,
                validate,
                json_only,
                direct,
            } => {
                self.extract(
                    kind.as_deref(),
                    output,
                    *save,
                    *validate,
                    *json_only,
                    *direct,
                )
                .await
            }
            Commands::Check => self.check().await,
            Commands::ValidateConfig => self.validate_config(),
        }
    }

    /// Load the mapping configuration from the CLI flag or fall back to builtin
    fn load_mapping(&self) -> Result<MappingConfig> {
        match &self.cli.mapping {
            Some(path) => load_mapping(path),
            None => MappingConfig::builtin(),
        }
    }

    /// Load blueprint definitions from the CLI flag or fall back to builtin
    fn load_registry(&self) -> Result<BlueprintRegistry> {
        match &self.cli.blueprints {
            Some(path) => load_blueprints(path),
            None => BlueprintRegistry::builtin(),
        }
    }

    fn build_mapper(&self, direct: bool) -> Result<Box<dyn ObjectMapper + Send + Sync>> {
        if direct {
            Ok(Box::new(DirectMapper::new()))
        } else {
            Ok(Box::new(SpecMapper::new(self.load_mapping()?)))
        }
    }

    async fn extract(
        &self,
        kind: Option<&str>,
        output: &PathBuf,
        save: bool,
        run_validation: bool,
        json_only: bool,
        direct: bool,
    ) -> Result<i32> {
        let filter = kind.map(ResourceKind::from_str).transpose()?;

        let config = ConnectorConfig::from_env();
        let client = CargClient::new(config)?;
        let mapper = self.build_mapper(direct)?;
        let registry = self.load_registry()?;

        let mut connector = Connector::new(client, mapper, registry);
        connector.start().await?;
        let objects = connector.resync_all(filter).await?;

        let report = if run_validation {
            Some(validate(&objects, connector.registry()))
        } else {
            None
        };

        if save {
            write_objects(output, &objects)?;
        }

        if json_only {
            let combined: BTreeMap<&str, &Vec<NormalizedObject>> = objects
                .iter()
                .map(|(kind, items)| (kind.endpoint(), items))
                .collect();
            println!("{}", serde_json::to_string_pretty(&combined)?);
        } else {
            print_summary(&objects, report.as_ref(), connector.stats().duration_ms);
        }

        let valid = report.as_ref().is_none_or(|r| r.valid);
        Ok(if valid { 0 } else { 1 })
    }

    async fn check(&self) -> Result<i32> {
        let config = ConnectorConfig::from_env();
        if config.is_mock_mode() {
            println!("No API configuration, connector would run against fixture data");
            return Ok(0);
        }
        let client = CargClient::new(config)?;
        if client.health_check().await {
            println!("CARG API is healthy");
            Ok(0)
        } else {
            println!("CARG API is not healthy");
            Ok(1)
        }
    }

    /// Cross-check that every mapped blueprint exists in the registry
    fn validate_config(&self) -> Result<i32> {
        let mapping = self.load_mapping()?;
        let registry = self.load_registry()?;

        for resource in &mapping.resources {
            if !registry.contains(&resource.blueprint) {
                return Err(Error::config(format!(
                    "mapping for kind '{}' targets unknown blueprint '{}'",
                    resource.kind, resource.blueprint
                )));
            }
        }
        println!(
            "Configuration valid: {} resource mappings, {} blueprints",
            mapping.resources.len(),
            registry.len()
        );
        Ok(0)
    }
}

fn print_summary(
    objects: &BTreeMap<ResourceKind, Vec<NormalizedObject>>,
    report: Option<&ValidationReport>,
    duration_ms: u64,
) {
    let total: usize = objects.values().map(Vec::len).sum();
    println!("Synced {total} objects in {duration_ms}ms");
    for (kind, items) in objects {
        println!("  {}: {}", kind.endpoint(), items.len());
    }

    if let Some(report) = report {
        println!();
        if report.valid {
            println!("Validation passed ({} warnings)", report.warnings.len());
        } else {
            println!(
                "Validation FAILED: {} errors, {} warnings",
                report.errors.len(),
                report.warnings.len()
            );
        }
        for error in &report.errors {
            println!("  error: {error}");
        }
        for warning in &report.warnings {
            println!("  warning: {warning}");
        }
    }
}
