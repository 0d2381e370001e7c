//! Fixture data served when fetches fall back
//!
//! A fixed known-good sample per resource kind, used in mock mode (no
//! credentials configured) and under `FallbackPolicy::SubstituteFixture`
//! when the remote errors out. The records form a consistent graph:
//! services reference projects, components and deployments reference
//! services.

use crate::types::{JsonValue, ResourceKind};
use serde_json::json;

fn mock_user(name: &str) -> JsonValue {
    match name {
        "john" => json!({"email": "john.doe@company.com", "username": "johndoe"}),
        "jane" => json!({"email": "jane.smith@company.com", "username": "janesmith"}),
        _ => json!({"email": "bob.wilson@company.com", "username": "bobwilson"}),
    }
}

/// Fixture items for one resource kind
pub fn fixture_items(kind: ResourceKind) -> Vec<JsonValue> {
    match kind {
        ResourceKind::Project => projects(),
        ResourceKind::Service => services(),
        ResourceKind::Component => components(),
        ResourceKind::Deployment => deployments(),
    }
}

/// Fixture items wrapped the way the remote wraps them
pub fn fixture_response(kind: ResourceKind) -> JsonValue {
    json!({ "data": fixture_items(kind) })
}

fn projects() -> Vec<JsonValue> {
    vec![
        json!({
            "id": 1,
            "name": "E-Commerce Platform",
            "status": "Active",
            "description": "Main e-commerce platform with microservices architecture",
            "owner": mock_user("john"),
            "budget": 500_000,
            "start_date": "2024-01-15",
            "end_date": "2024-12-31",
            "tags": ["microservices", "e-commerce", "critical"],
            "azure_devops": {"project_name": "ECommercePlatform"}
        }),
        json!({
            "id": 2,
            "name": "Data Analytics Pipeline",
            "status": "Planning",
            "description": "Real-time data analytics and reporting system",
            "owner": mock_user("jane"),
            "budget": 250_000,
            "start_date": "2024-03-01",
            "end_date": "2024-08-31",
            "tags": ["analytics", "pipeline", "data"],
            "azure_devops": {"project_name": "DataAnalytics"}
        }),
    ]
}

fn services() -> Vec<JsonValue> {
    let now = chrono::Utc::now().to_rfc3339();
    vec![
        json!({
            "id": 101,
            "name": "User Authentication Service",
            "status": "Running",
            "health_status": "Healthy",
            "version": "v2.1.3",
            "repository": {"url": "https://github.com/company/auth-service"},
            "language": "Python",
            "metrics": {"cpu_usage": 45.2, "memory_usage_mb": 512},
            "last_deployment": {"timestamp": now},
            "azure_devops": {"pipeline_name": "auth-service-ci-cd"},
            "project_id": 1
        }),
        json!({
            "id": 102,
            "name": "Payment Processing Service",
            "status": "Running",
            "health_status": "Healthy",
            "version": "v1.8.1",
            "repository": {"url": "https://github.com/company/payment-service"},
            "language": "Java",
            "metrics": {"cpu_usage": 32.1, "memory_usage_mb": 768},
            "last_deployment": {"timestamp": now},
            "azure_devops": {"pipeline_name": "payment-service-ci-cd"},
            "project_id": 1
        }),
        json!({
            "id": 103,
            "name": "Analytics Ingestion Service",
            "status": "Deploying",
            "health_status": "Unknown",
            "version": "v0.5.2-beta",
            "repository": {"url": "https://github.com/company/analytics-ingest"},
            "language": "Go",
            "metrics": {"cpu_usage": 0, "memory_usage_mb": 0},
            "last_deployment": {"timestamp": now},
            "azure_devops": {"pipeline_name": "analytics-ingest-ci-cd"},
            "project_id": 2
        }),
    ]
}

fn components() -> Vec<JsonValue> {
    vec![
        json!({
            "id": 201,
            "name": "JWT Token Manager",
            "type": "Library",
            "status": "Active",
            "description": "Handles JWT token generation and validation",
            "maintainer": mock_user("john"),
            "complexity": "Medium",
            "test_coverage": 85.5,
            "service_id": 101
        }),
        json!({
            "id": 202,
            "name": "User Database",
            "type": "Database",
            "status": "Active",
            "description": "PostgreSQL database for user data",
            "maintainer": mock_user("jane"),
            "complexity": "Low",
            "test_coverage": 92.0,
            "service_id": 101
        }),
        json!({
            "id": 203,
            "name": "Payment Gateway API",
            "type": "API",
            "status": "Active",
            "description": "REST API for payment processing",
            "maintainer": mock_user("bob"),
            "complexity": "High",
            "test_coverage": 78.3,
            "service_id": 102
        }),
    ]
}

fn deployments() -> Vec<JsonValue> {
    let now = chrono::Utc::now().to_rfc3339();
    vec![
        json!({
            "id": 301,
            "service_name": "User Authentication Service",
            "status": "Success",
            "environment": "Production",
            "version": "v2.1.3",
            "deployed_by": mock_user("john"),
            "deployment_time": now,
            "duration_seconds": 180,
            "azure_devops": {"run_id": "20241005.1"},
            "logs": "Deployment successful\nAll health checks passed\nService is running",
            "service_id": 101
        }),
        json!({
            "id": 302,
            "service_name": "Payment Processing Service",
            "status": "Success",
            "environment": "Production",
            "version": "v1.8.1",
            "deployed_by": mock_user("jane"),
            "deployment_time": now,
            "duration_seconds": 240,
            "azure_devops": {"run_id": "20241005.2"},
            "logs": "Deployment completed\nDatabase migration successful\nAll tests passed",
            "service_id": 102
        }),
        json!({
            "id": 303,
            "service_name": "Analytics Ingestion Service",
            "status": "In Progress",
            "environment": "Staging",
            "version": "v0.5.2-beta",
            "deployed_by": mock_user("bob"),
            "deployment_time": now,
            "duration_seconds": 0,
            "azure_devops": {"run_id": "20241005.3"},
            "logs": "Deployment in progress...\nBuilding container image...",
            "service_id": 103
        }),
    ]
}
