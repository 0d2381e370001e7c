//! Mapping configuration loading
//!
//! Reads the declarative mapping from YAML. A missing or malformed file is
//! fatal; there is no fallback mapping once the operator has pointed at one.

use super::types::MappingConfig;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// The builtin mapping, equivalent to `DirectMapper` minus the null padding
const BUILTIN_MAPPING_YAML: &str = r#"
resources:
  - kind: project
    blueprint: cargProject
    identifier: {field: id}
    title: {field: name}
    properties:
      status: {field: status}
      description: {field: description}
      owner: {fallback: [owner.email, owner.username]}
      budget: {field: budget}
      startDate: {field: start_date}
      endDate: {field: end_date}
      tags: {field: tags}
      azureDevOpsProject: {field: azure_devops.project_name}

  - kind: service
    blueprint: cargService
    identifier: {field: id}
    title: {field: name}
    properties:
      status: {field: status}
      healthStatus: {field: health_status}
      version: {field: version}
      repository: {field: repository.url}
      language: {field: language}
      cpu: {field: metrics.cpu_usage}
      memory: {field: metrics.memory_usage_mb}
      lastDeployment: {field: last_deployment.timestamp}
      azurePipeline: {field: azure_devops.pipeline_name}
    relations:
      project: {field: project_id}

  - kind: component
    blueprint: cargComponent
    identifier: {field: id}
    title: {field: name}
    properties:
      type: {field: type}
      status: {field: status}
      description: {field: description}
      maintainer: {fallback: [maintainer.email, maintainer.username]}
      complexity: {field: complexity}
      testCoverage: {field: test_coverage}
    relations:
      service: {field: service_id}

  - kind: deployment
    blueprint: cargDeployment
    identifier: {field: id}
    title: {join: [service_name, environment, version], separator: " - "}
    properties:
      status: {field: status}
      environment: {field: environment}
      version: {field: version}
      deployedBy: {fallback: [deployed_by.email, deployed_by.username]}
      deploymentTime: {field: deployment_time}
      duration: {field: duration_seconds}
      azurePipelineRun: {field: azure_devops.run_id}
      logs: {field: logs}
    relations:
      service: {field: service_id}
"#;

impl MappingConfig {
    /// The builtin mapping covering all four resource kinds
    pub fn builtin() -> Result<Self> {
        load_mapping_from_str(BUILTIN_MAPPING_YAML)
    }

    /// Check the configuration for structural problems
    pub fn validate(&self) -> Result<()> {
        if self.resources.is_empty() {
            return Err(Error::config("mapping defines no resources"));
        }
        let mut seen = BTreeSet::new();
        for resource in &self.resources {
            if !seen.insert(resource.kind) {
                return Err(Error::config(format!(
                    "duplicate mapping for kind '{}'",
                    resource.kind
                )));
            }
            if resource.blueprint.is_empty() {
                return Err(Error::config(format!(
                    "mapping for kind '{}' has an empty blueprint",
                    resource.kind
                )));
            }
        }
        Ok(())
    }
}

/// Parse a mapping configuration from YAML text
pub fn load_mapping_from_str(yaml: &str) -> Result<MappingConfig> {
    let config: MappingConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

/// Load a mapping configuration from a YAML file
pub fn load_mapping(path: impl AsRef<Path>) -> Result<MappingConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let config = load_mapping_from_str(&text)?;
    info!(
        path = %path.display(),
        resources = config.resources.len(),
        "loaded mapping configuration"
    );
    Ok(config)
}
