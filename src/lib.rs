// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # carg-sync
//!
//! Connector that syncs the CARG engineering system (projects, services,
//! components, deployments) into software-catalog objects.
//!
//! ## Features
//!
//! - **Paginated Extraction**: Offset/take pagination with lazy page streams
//! - **Resilient Fetching**: Bounded rate-limit retry, fixture fallback, mock mode
//! - **Declarative Mapping**: YAML-driven field extraction with typed operations
//! - **Blueprint Validation**: Schema checks producing an exhaustive report
//! - **JSON Output**: Per-kind and combined object files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use carg_sync::{
//!     BlueprintRegistry, CargClient, Connector, ConnectorConfig, MappingConfig, SpecMapper,
//! };
//!
//! #[tokio::main]
//! async fn main() -> carg_sync::Result<()> {
//!     let client = CargClient::new(ConnectorConfig::from_env())?;
//!     let mapper = SpecMapper::new(MappingConfig::builtin()?);
//!     let mut connector =
//!         Connector::new(client, Box::new(mapper), BlueprintRegistry::builtin()?);
//!
//!     connector.start().await?;
//!     let objects = connector.resync_all(None).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Connector                            │
//! │  start() → health + webhooks    resync_all() → objects      │
//! └─────────────────────────────────────────────────────────────┘
//!                │                              │
//! ┌──────────────┴─────────┐      ┌─────────────┴──────────────┐
//! │       CargClient       │      │      Mapping engine        │
//! │  offset/take pages     │      │  SpecMapper (YAML-driven)  │
//! │  429 retry + backoff   │      │  DirectMapper (per kind)   │
//! │  fixture fallback      │      └─────────────┬──────────────┘
//! └────────────────────────┘                    │
//!                              ┌────────────────┴──────────────┐
//!                              │   Blueprint validation        │
//!                              │   JSON output files           │
//!                              └───────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration
pub mod config;

/// Fixture data for mock mode and fetch fallback
pub mod fixtures;

/// HTTP client for the CARG API
pub mod client;

/// Raw item to catalog object mapping
pub mod mapping;

/// Blueprint schemas and validation
pub mod blueprint;

/// Sync orchestration
pub mod sync;

/// JSON output emission
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use blueprint::{load_blueprints, validate, BlueprintRegistry, ValidationReport};
pub use client::{CargClient, Page};
pub use config::ConnectorConfig;
pub use mapping::{
    load_mapping, DirectMapper, MappingConfig, NormalizedObject, ObjectMapper, SpecMapper,
};
pub use output::write_objects;
pub use sync::{Connector, SyncStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
