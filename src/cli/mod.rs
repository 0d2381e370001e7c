//! CLI module
//!
//! Command-line interface for the connector.
//!
//! # Commands
//!
//! - `extract` - Sync resources and emit catalog objects
//! - `check` - Test connection to the CARG API
//! - `validate-config` - Check the mapping and blueprint files

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
