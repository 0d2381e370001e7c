//! Blueprint schema types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expected type of a blueprint property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// A type this checker does not know; values always pass
    #[serde(other)]
    Unknown,
}

impl PropertyType {
    /// Whether a JSON value conforms to this type
    ///
    /// Integers and floats both count as number. Null is handled by the
    /// caller (a warning, not a type mismatch).
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            PropertyType::String => value.is_string(),
            PropertyType::Number => value.is_number(),
            PropertyType::Boolean => value.is_boolean(),
            PropertyType::Array => value.is_array(),
            PropertyType::Object => value.is_object(),
            PropertyType::Unknown => true,
        }
    }

    /// Name used in validation messages
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
            PropertyType::Unknown => "unknown",
        }
    }
}

/// Describe the JSON type of a value for validation messages
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Schema for one blueprint property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

/// Schema for one blueprint relation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationSchema {
    /// Blueprint the relation points at
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub required: bool,
}

/// Property schemas of a blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlueprintSchema {
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
}

/// One catalog blueprint definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    pub identifier: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub schema: BlueprintSchema,
    #[serde(default)]
    pub relations: BTreeMap<String, RelationSchema>,
}

impl Blueprint {
    /// Expected type of a property, if the schema declares it
    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.schema
            .properties
            .get(name)
            .map(|p| p.property_type)
    }

    /// Whether the blueprint declares a relation with this name
    pub fn has_relation(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(PropertyType::String, json!("x"), true; "string matches string")]
    #[test_case(PropertyType::String, json!(42), false; "string rejects number")]
    #[test_case(PropertyType::Number, json!(42), true; "number matches integer")]
    #[test_case(PropertyType::Number, json!(1.5), true; "number matches float")]
    #[test_case(PropertyType::Number, json!("42"), false; "number rejects string")]
    #[test_case(PropertyType::Boolean, json!(true), true; "boolean matches bool")]
    #[test_case(PropertyType::Array, json!([]), true; "array matches array")]
    #[test_case(PropertyType::Array, json!({}), false; "array rejects object")]
    #[test_case(PropertyType::Object, json!({}), true; "object matches object")]
    fn test_property_type_matches(expected: PropertyType, value: JsonValue, outcome: bool) {
        assert_eq!(expected.matches(&value), outcome);
    }

    #[test]
    fn test_unknown_type_always_matches() {
        let schema: PropertySchema = serde_json::from_value(json!({"type": "url"})).unwrap();
        assert_eq!(schema.property_type, PropertyType::Unknown);
        assert!(schema.property_type.matches(&json!("anything")));
        assert!(schema.property_type.matches(&json!(42)));
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!("s")), "string");
        assert_eq!(json_type_name(&json!([1])), "array");
    }
}
