//! Blueprint schemas and validation
//!
//! Blueprint definitions describe the expected shape of catalog objects.
//! The validator checks synced objects against them and produces a report;
//! it never mutates or drops objects.

mod registry;
mod types;
mod validate;

pub use registry::{load_blueprints, BlueprintRegistry};
pub use types::{Blueprint, BlueprintSchema, PropertySchema, PropertyType, RelationSchema};
pub use validate::{validate, KindStats, ValidationReport};
