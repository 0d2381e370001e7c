//! Common types used throughout carg-sync
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Resource Kind
// ============================================================================

/// The four synchronized entity categories of the CARG system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Project,
    Service,
    Component,
    Deployment,
}

impl ResourceKind {
    /// All kinds in sync order (parents before children)
    pub fn all() -> [ResourceKind; 4] {
        [
            ResourceKind::Project,
            ResourceKind::Service,
            ResourceKind::Component,
            ResourceKind::Deployment,
        ]
    }

    /// API endpoint path segment for this kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Project => "projects",
            ResourceKind::Service => "services",
            ResourceKind::Component => "components",
            ResourceKind::Deployment => "deployments",
        }
    }

    /// Catalog blueprint identifier this kind maps onto
    pub fn blueprint(&self) -> &'static str {
        match self {
            ResourceKind::Project => "cargProject",
            ResourceKind::Service => "cargService",
            ResourceKind::Component => "cargComponent",
            ResourceKind::Deployment => "cargDeployment",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Project => "project",
            ResourceKind::Service => "service",
            ResourceKind::Component => "component",
            ResourceKind::Deployment => "deployment",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" | "projects" => Ok(ResourceKind::Project),
            "service" | "services" => Ok(ResourceKind::Service),
            "component" | "components" => Ok(ResourceKind::Component),
            "deployment" | "deployments" => Ok(ResourceKind::Deployment),
            other => Err(crate::error::Error::unknown_kind(other)),
        }
    }
}

// ============================================================================
// Fallback Policy
// ============================================================================

/// What to do when a fetch fails with a non-recoverable error
///
/// `SubstituteFixture` trades correctness for availability: a failed request
/// yields a fixed known-good sample instead of an error. `FailFast` surfaces
/// the error to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Propagate fetch errors to the caller
    FailFast,
    /// Substitute a fixed fixture record set for the failed kind
    #[default]
    SubstituteFixture,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
