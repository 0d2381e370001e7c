//! Mapping types
//!
//! The normalized catalog object plus the declarative mapping specification.
//! Extraction is a small typed operation set evaluated by the interpreter in
//! `extract.rs`; there is no embedded expression language.

use crate::types::{JsonObject, JsonValue, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Normalized Object
// ============================================================================

/// One catalog object, produced from exactly one raw item
///
/// Immutable after creation; `identifier`, `title`, and `blueprint` are
/// required non-empty once validated, `properties` and `relations` are
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedObject {
    /// Unique identifier within the blueprint, always a string
    pub identifier: String,
    /// Human-readable title
    pub title: String,
    /// Blueprint this object is validated against
    pub blueprint: String,
    /// Scalar-or-list property values
    #[serde(default, skip_serializing_if = "JsonObject::is_empty")]
    pub properties: JsonObject,
    /// Relation name to referenced object identifier
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relations: BTreeMap<String, String>,
}

impl NormalizedObject {
    /// Create an object with empty properties and relations
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        blueprint: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            blueprint: blueprint.into(),
            properties: JsonObject::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Add a property value
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Add a relation
    #[must_use]
    pub fn with_relation(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.relations.insert(name.into(), target.into());
        self
    }
}

// ============================================================================
// Extraction Operations
// ============================================================================

/// One extraction operation against a raw item
///
/// Variants are distinguished by their key in YAML:
/// `{field: owner.email}`, `{fallback: [owner.email, owner.username]}`,
/// `{constant: cargProject}`, `{join: [a, b, c], separator: " - "}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extract {
    /// Dot-path lookup into the raw item
    Field {
        /// Path such as `owner.email`
        field: String,
    },
    /// First non-null of several dot-path lookups
    Fallback {
        /// Paths tried in order
        fallback: Vec<String>,
    },
    /// A fixed value independent of the raw item
    Constant {
        /// The value to emit
        constant: JsonValue,
    },
    /// Stringified lookups joined with a separator
    Join {
        /// Paths whose values are stringified in order
        join: Vec<String>,
        /// Separator between parts
        #[serde(default = "default_separator")]
        separator: String,
    },
}

fn default_separator() -> String {
    " - ".to_string()
}

impl Extract {
    /// Convenience constructor for a field lookup
    pub fn field(path: impl Into<String>) -> Self {
        Self::Field { field: path.into() }
    }

    /// Convenience constructor for a fallback chain
    pub fn fallback(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Fallback {
            fallback: paths.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Mapping Specification
// ============================================================================

/// Mapping for one resource kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceMapping {
    /// Resource kind this mapping applies to
    pub kind: ResourceKind,
    /// Target blueprint identifier
    pub blueprint: String,
    /// Identifier extraction (result coerced to string)
    pub identifier: Extract,
    /// Title extraction
    pub title: Extract,
    /// Property name to extraction
    #[serde(default)]
    pub properties: BTreeMap<String, Extract>,
    /// Relation name to extraction (result coerced to string)
    #[serde(default)]
    pub relations: BTreeMap<String, Extract>,
}

/// The full declarative mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// One mapping per resource kind
    pub resources: Vec<ResourceMapping>,
}

impl MappingConfig {
    /// Find the mapping for a resource kind
    pub fn mapping_for(&self, kind: ResourceKind) -> Option<&ResourceMapping> {
        self.resources.iter().find(|r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_yaml_variants() {
        let e: Extract = serde_yaml::from_str("field: owner.email").unwrap();
        assert_eq!(e, Extract::field("owner.email"));

        let e: Extract = serde_yaml::from_str("fallback: [owner.email, owner.username]").unwrap();
        assert_eq!(e, Extract::fallback(["owner.email", "owner.username"]));

        let e: Extract = serde_yaml::from_str("constant: cargProject").unwrap();
        assert_eq!(
            e,
            Extract::Constant {
                constant: json!("cargProject")
            }
        );

        let e: Extract =
            serde_yaml::from_str("{join: [service_name, environment, version], separator: \" - \"}")
                .unwrap();
        match e {
            Extract::Join { join, separator } => {
                assert_eq!(join.len(), 3);
                assert_eq!(separator, " - ");
            }
            other => panic!("expected join, got {other:?}"),
        }
    }

    #[test]
    fn test_join_separator_defaults() {
        let e: Extract = serde_yaml::from_str("join: [a, b]").unwrap();
        assert_eq!(
            e,
            Extract::Join {
                join: vec!["a".to_string(), "b".to_string()],
                separator: " - ".to_string()
            }
        );
    }

    #[test]
    fn test_normalized_object_serialization_skips_empty() {
        let obj = NormalizedObject::new("1", "Thing", "cargProject");
        let json = serde_json::to_value(&obj).unwrap();
        assert!(json.get("properties").is_none());
        assert!(json.get("relations").is_none());

        let obj = obj.with_relation("project", "1");
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["relations"]["project"], "1");
    }
}
