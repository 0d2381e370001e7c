//! Mapping engine
//!
//! Transforms raw CARG items into normalized catalog objects, either through
//! the declarative YAML mapping (`SpecMapper`) or the hand-written per-kind
//! functions (`DirectMapper`). Both implement `ObjectMapper` so the sync
//! orchestrator does not care which is in play.

mod direct;
mod extract;
mod loader;
mod types;

pub use direct::DirectMapper;
pub use extract::{coerce_to_string, lookup_path, SpecMapper};
pub use loader::{load_mapping, load_mapping_from_str};
pub use types::{Extract, MappingConfig, NormalizedObject, ResourceMapping};

use crate::types::{JsonValue, ResourceKind};

/// Turns one raw item into at most one normalized object
pub trait ObjectMapper {
    /// Transform a raw item of the given kind
    ///
    /// None means the item could not be mapped and is dropped from the sync.
    fn transform(&self, kind: ResourceKind, raw: &JsonValue) -> Option<NormalizedObject>;
}
