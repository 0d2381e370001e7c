//! Hardcoded per-kind mapper
//!
//! Mirrors the declarative mapping in plain Rust, one function per kind.
//! Unlike `SpecMapper` it writes null for absent source fields, so gaps in
//! the remote data surface as validation warnings instead of silently
//! disappearing from the output.

use super::extract::{coerce_to_string, lookup_path};
use super::types::NormalizedObject;
use super::ObjectMapper;
use crate::types::{JsonValue, ResourceKind};
use serde_json::json;

/// Mapper with one hand-written transform per resource kind
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMapper;

impl DirectMapper {
    pub fn new() -> Self {
        Self
    }
}

impl ObjectMapper for DirectMapper {
    fn transform(&self, kind: ResourceKind, raw: &JsonValue) -> Option<NormalizedObject> {
        let object = match kind {
            ResourceKind::Project => map_project(raw),
            ResourceKind::Service => map_service(raw),
            ResourceKind::Component => map_component(raw),
            ResourceKind::Deployment => map_deployment(raw),
        };
        Some(object)
    }
}

fn get(raw: &JsonValue, path: &str) -> JsonValue {
    lookup_path(raw, path).cloned().unwrap_or(JsonValue::Null)
}

fn get_string(raw: &JsonValue, path: &str) -> String {
    lookup_path(raw, path)
        .and_then(coerce_to_string)
        .unwrap_or_default()
}

fn first_of(raw: &JsonValue, paths: &[&str]) -> JsonValue {
    paths
        .iter()
        .filter_map(|p| lookup_path(raw, p))
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(JsonValue::Null)
}

fn map_project(raw: &JsonValue) -> NormalizedObject {
    let mut object = NormalizedObject::new(
        get_string(raw, "id"),
        get_string(raw, "name"),
        ResourceKind::Project.blueprint(),
    );
    object.properties.insert("status".into(), get(raw, "status"));
    object
        .properties
        .insert("description".into(), get(raw, "description"));
    object.properties.insert(
        "owner".into(),
        first_of(raw, &["owner.email", "owner.username"]),
    );
    object.properties.insert("budget".into(), get(raw, "budget"));
    object
        .properties
        .insert("startDate".into(), get(raw, "start_date"));
    object
        .properties
        .insert("endDate".into(), get(raw, "end_date"));
    let tags = match get(raw, "tags") {
        JsonValue::Null => json!([]),
        tags => tags,
    };
    object.properties.insert("tags".into(), tags);
    object.properties.insert(
        "azureDevOpsProject".into(),
        get(raw, "azure_devops.project_name"),
    );
    object
}

fn map_service(raw: &JsonValue) -> NormalizedObject {
    let mut object = NormalizedObject::new(
        get_string(raw, "id"),
        get_string(raw, "name"),
        ResourceKind::Service.blueprint(),
    );
    object.properties.insert("status".into(), get(raw, "status"));
    let health = match get(raw, "health_status") {
        JsonValue::Null => json!("Unknown"),
        health => health,
    };
    object.properties.insert("healthStatus".into(), health);
    object
        .properties
        .insert("version".into(), get(raw, "version"));
    object
        .properties
        .insert("repository".into(), get(raw, "repository.url"));
    object
        .properties
        .insert("language".into(), get(raw, "language"));
    object
        .properties
        .insert("cpu".into(), get(raw, "metrics.cpu_usage"));
    object
        .properties
        .insert("memory".into(), get(raw, "metrics.memory_usage_mb"));
    object.properties.insert(
        "lastDeployment".into(),
        get(raw, "last_deployment.timestamp"),
    );
    object.properties.insert(
        "azurePipeline".into(),
        get(raw, "azure_devops.pipeline_name"),
    );
    let project = get_string(raw, "project_id");
    if !project.is_empty() {
        object.relations.insert("project".into(), project);
    }
    object
}

fn map_component(raw: &JsonValue) -> NormalizedObject {
    let mut object = NormalizedObject::new(
        get_string(raw, "id"),
        get_string(raw, "name"),
        ResourceKind::Component.blueprint(),
    );
    object.properties.insert("type".into(), get(raw, "type"));
    object.properties.insert("status".into(), get(raw, "status"));
    object
        .properties
        .insert("description".into(), get(raw, "description"));
    object.properties.insert(
        "maintainer".into(),
        first_of(raw, &["maintainer.email", "maintainer.username"]),
    );
    object
        .properties
        .insert("complexity".into(), get(raw, "complexity"));
    object
        .properties
        .insert("testCoverage".into(), get(raw, "test_coverage"));
    let service = get_string(raw, "service_id");
    if !service.is_empty() {
        object.relations.insert("service".into(), service);
    }
    object
}

fn map_deployment(raw: &JsonValue) -> NormalizedObject {
    let title = format!(
        "{} - {} - {}",
        get_string(raw, "service_name"),
        get_string(raw, "environment"),
        get_string(raw, "version"),
    );
    let mut object = NormalizedObject::new(
        get_string(raw, "id"),
        title,
        ResourceKind::Deployment.blueprint(),
    );
    object.properties.insert("status".into(), get(raw, "status"));
    object
        .properties
        .insert("environment".into(), get(raw, "environment"));
    object
        .properties
        .insert("version".into(), get(raw, "version"));
    object.properties.insert(
        "deployedBy".into(),
        first_of(raw, &["deployed_by.email", "deployed_by.username"]),
    );
    object
        .properties
        .insert("deploymentTime".into(), get(raw, "deployment_time"));
    object
        .properties
        .insert("duration".into(), get(raw, "duration_seconds"));
    object
        .properties
        .insert("azurePipelineRun".into(), get(raw, "azure_devops.run_id"));
    object.properties.insert("logs".into(), get(raw, "logs"));
    let service = get_string(raw, "service_id");
    if !service.is_empty() {
        object.relations.insert("service".into(), service);
    }
    object
}
