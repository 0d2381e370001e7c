//! Blueprint registry
//!
//! Holds the blueprint definitions objects are validated against. Ships a
//! builtin set for the four CARG blueprints; operators can point at their own
//! JSON file instead.

use super::types::Blueprint;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const BUILTIN_BLUEPRINTS_JSON: &str = r#"
[
  {
    "identifier": "cargProject",
    "title": "CARG Project",
    "schema": {
      "properties": {
        "status": {"type": "string"},
        "description": {"type": "string"},
        "owner": {"type": "string"},
        "budget": {"type": "number"},
        "startDate": {"type": "string"},
        "endDate": {"type": "string"},
        "tags": {"type": "array"},
        "azureDevOpsProject": {"type": "string"}
      }
    }
  },
  {
    "identifier": "cargService",
    "title": "CARG Service",
    "schema": {
      "properties": {
        "status": {"type": "string"},
        "healthStatus": {"type": "string"},
        "version": {"type": "string"},
        "repository": {"type": "string"},
        "language": {"type": "string"},
        "cpu": {"type": "number"},
        "memory": {"type": "number"},
        "lastDeployment": {"type": "string"},
        "azurePipeline": {"type": "string"}
      }
    },
    "relations": {
      "project": {"target": "cargProject", "required": false}
    }
  },
  {
    "identifier": "cargComponent",
    "title": "CARG Component",
    "schema": {
      "properties": {
        "type": {"type": "string"},
        "status": {"type": "string"},
        "description": {"type": "string"},
        "maintainer": {"type": "string"},
        "complexity": {"type": "string"},
        "testCoverage": {"type": "number"}
      }
    },
    "relations": {
      "service": {"target": "cargService", "required": false}
    }
  },
  {
    "identifier": "cargDeployment",
    "title": "CARG Deployment",
    "schema": {
      "properties": {
        "status": {"type": "string"},
        "environment": {"type": "string"},
        "version": {"type": "string"},
        "deployedBy": {"type": "string"},
        "deploymentTime": {"type": "string"},
        "duration": {"type": "number"},
        "azurePipelineRun": {"type": "string"},
        "logs": {"type": "string"}
      }
    },
    "relations": {
      "service": {"target": "cargService", "required": false}
    }
  }
]
"#;

/// Lookup table of blueprints by identifier
#[derive(Debug, Clone, Default)]
pub struct BlueprintRegistry {
    blueprints: BTreeMap<String, Blueprint>,
}

impl BlueprintRegistry {
    /// Build a registry from a list of blueprints
    pub fn new(blueprints: impl IntoIterator<Item = Blueprint>) -> Self {
        Self {
            blueprints: blueprints
                .into_iter()
                .map(|b| (b.identifier.clone(), b))
                .collect(),
        }
    }

    /// The builtin registry for the four CARG blueprints
    pub fn builtin() -> Result<Self> {
        let blueprints: Vec<Blueprint> = serde_json::from_str(BUILTIN_BLUEPRINTS_JSON)?;
        Ok(Self::new(blueprints))
    }

    /// Look up a blueprint by identifier
    pub fn get(&self, identifier: &str) -> Option<&Blueprint> {
        self.blueprints.get(identifier)
    }

    /// Whether a blueprint with this identifier exists
    pub fn contains(&self, identifier: &str) -> bool {
        self.blueprints.contains_key(identifier)
    }

    /// Number of registered blueprints
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Identifiers of all registered blueprints
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.blueprints.keys().map(String::as_str)
    }
}

/// Load blueprints from a JSON file
///
/// Accepts either a bare array of blueprints or `{"blueprints": [...]}`.
pub fn load_blueprints(path: impl AsRef<Path>) -> Result<BlueprintRegistry> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let list = if value.is_array() {
        value
    } else {
        value
            .get("blueprints")
            .cloned()
            .ok_or_else(|| Error::config("blueprint file has no 'blueprints' array"))?
    };
    let blueprints: Vec<Blueprint> = serde_json::from_value(list)?;
    let registry = BlueprintRegistry::new(blueprints);
    info!(
        path = %path.display(),
        blueprints = registry.len(),
        "loaded blueprint definitions"
    );
    Ok(registry)
}
