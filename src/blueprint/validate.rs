//! Object validation against blueprint schemas
//!
//! Pure check over in-memory objects. Findings accumulate exhaustively into a
//! report; nothing here stops the sync or raises an error. Errors flip the
//! report invalid, warnings do not.

use super::registry::BlueprintRegistry;
use super::types::json_type_name;
use crate::mapping::NormalizedObject;
use crate::types::ResourceKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-kind validation counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct KindStats {
    pub total: usize,
    pub valid: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Outcome of validating a full sync result
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// True when no errors were found (warnings allowed)
    pub valid: bool,
    pub total_objects: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: BTreeMap<String, KindStats>,
}

/// Validate all synced objects against their blueprints
///
/// Never short-circuits: every object is checked and every finding recorded,
/// so one bad record does not mask the rest.
pub fn validate(
    objects: &BTreeMap<ResourceKind, Vec<NormalizedObject>>,
    registry: &BlueprintRegistry,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (kind, items) in objects {
        let stats = report.stats.entry(kind.to_string()).or_default();
        stats.total = items.len();
        report.total_objects += items.len();

        for (index, object) in items.iter().enumerate() {
            let errors_before = report.errors.len();
            let warnings_before = report.warnings.len();
            check_object(*kind, index, object, registry, &mut report);
            let object_errors = report.errors.len() - errors_before;
            let object_warnings = report.warnings.len() - warnings_before;

            let stats = report
                .stats
                .entry(kind.to_string())
                .or_default();
            stats.errors += object_errors;
            stats.warnings += object_warnings;
            if object_errors == 0 {
                stats.valid += 1;
            }
        }
    }

    report.valid = report.errors.is_empty();
    report
}

fn check_object(
    kind: ResourceKind,
    index: usize,
    object: &NormalizedObject,
    registry: &BlueprintRegistry,
    report: &mut ValidationReport,
) {
    let subject = format!("{kind}[{index}]");

    for (field, value) in [
        ("identifier", &object.identifier),
        ("title", &object.title),
        ("blueprint", &object.blueprint),
    ] {
        if value.is_empty() {
            report
                .errors
                .push(format!("{subject}: Missing or empty required field '{field}'"));
        }
    }
    if object.blueprint.is_empty() {
        return;
    }

    let Some(blueprint) = registry.get(&object.blueprint) else {
        report.errors.push(format!(
            "{subject}: Unknown blueprint '{}'",
            object.blueprint
        ));
        return;
    };

    for (name, value) in &object.properties {
        if value.is_null() {
            report
                .warnings
                .push(format!("{subject}: Property '{name}' is null"));
            continue;
        }
        if let Some(expected) = blueprint.property_type(name) {
            if !expected.matches(value) {
                report.errors.push(format!(
                    "{subject}: Property '{name}' should be {}, got {}",
                    expected.name(),
                    json_type_name(value)
                ));
            }
        }
    }

    for name in object.relations.keys() {
        if !blueprint.has_relation(name) {
            report
                .errors
                .push(format!("{subject}: Unknown relation '{name}'"));
        }
    }
}
