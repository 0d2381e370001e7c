//! Extraction interpreter and the declarative mapper
//!
//! Evaluates `Extract` operations against raw JSON items and assembles
//! `NormalizedObject`s per the loaded `MappingConfig`. Fields that yield no
//! value are omitted from the object rather than written as null.

use super::types::{Extract, MappingConfig, NormalizedObject};
use super::ObjectMapper;
use crate::types::{JsonValue, ResourceKind};
use tracing::warn;

/// Look up a dot-separated path in a JSON value
///
/// Each segment must resolve to an object member; a missing segment or a
/// non-object intermediate yields None. Array indexing is not supported.
pub fn lookup_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Coerce a scalar JSON value to its string form
///
/// Strings pass through unquoted, numbers and booleans are formatted,
/// everything else (null, arrays, objects) yields None.
pub fn coerce_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Extract {
    /// Evaluate this operation against a raw item
    ///
    /// Returns None when the operation yields no usable value, which callers
    /// treat as "omit the field". Null lookups count as absent.
    pub fn eval(&self, raw: &JsonValue) -> Option<JsonValue> {
        match self {
            Extract::Field { field } => lookup_path(raw, field)
                .filter(|v| !v.is_null())
                .cloned(),
            Extract::Fallback { fallback } => fallback
                .iter()
                .filter_map(|path| lookup_path(raw, path))
                .find(|v| !v.is_null())
                .cloned(),
            Extract::Constant { constant } => {
                if constant.is_null() {
                    None
                } else {
                    Some(constant.clone())
                }
            }
            Extract::Join { join, separator } => {
                let parts: Vec<String> = join
                    .iter()
                    .map(|path| {
                        lookup_path(raw, path)
                            .and_then(coerce_to_string)
                            .unwrap_or_default()
                    })
                    .collect();
                Some(JsonValue::String(parts.join(separator)))
            }
        }
    }

    /// Evaluate and coerce the result to a string
    pub fn eval_string(&self, raw: &JsonValue) -> Option<String> {
        self.eval(raw).as_ref().and_then(coerce_to_string)
    }
}

/// Mapper driven by a declarative `MappingConfig`
///
/// One raw item in, at most one normalized object out. Items whose kind has
/// no mapping are dropped with a warning.
#[derive(Debug, Clone)]
pub struct SpecMapper {
    config: MappingConfig,
}

impl SpecMapper {
    /// Create a mapper from a loaded mapping configuration
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    /// The mapping configuration in use
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }
}

impl ObjectMapper for SpecMapper {
    fn transform(&self, kind: ResourceKind, raw: &JsonValue) -> Option<NormalizedObject> {
        let mapping = self.config.mapping_for(kind)?;

        let identifier = mapping.identifier.eval_string(raw).unwrap_or_else(|| {
            warn!(kind = %kind, "item has no identifier value");
            String::new()
        });
        let title = mapping.title.eval_string(raw).unwrap_or_else(|| {
            warn!(kind = %kind, identifier = %identifier, "item has no title value");
            String::new()
        });

        let mut object = NormalizedObject::new(identifier, title, mapping.blueprint.clone());

        for (name, extract) in &mapping.properties {
            if let Some(value) = extract.eval(raw) {
                object.properties.insert(name.clone(), value);
            }
        }
        for (name, extract) in &mapping.relations {
            if let Some(target) = extract.eval_string(raw) {
                object.relations.insert(name.clone(), target);
            }
        }

        Some(object)
    }
}
