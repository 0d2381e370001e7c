//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CARG catalog sync CLI
#[derive(Parser, Debug)]
#[command(name = "carg-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Mapping configuration file (YAML, builtin mapping when omitted)
    #[arg(short, long, global = true)]
    pub mapping: Option<PathBuf>,

    /// Blueprint definitions file (JSON, builtin blueprints when omitted)
    #[arg(short, long, global = true)]
    pub blueprints: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync resources from the CARG API into catalog objects
    Extract {
        /// Resource kind to sync (project, service, component, deployment; all when omitted)
        #[arg(short, long)]
        kind: Option<String>,

        /// Directory for the emitted JSON files
        #[arg(short, long, default_value = "port_objects")]
        output: PathBuf,

        /// Write the synced objects to the output directory
        #[arg(long)]
        save: bool,

        /// Validate objects against their blueprints
        #[arg(long)]
        validate: bool,

        /// Print the combined JSON to stdout and nothing else
        #[arg(long)]
        json_only: bool,

        /// Use the hand-written per-kind mapper instead of the declarative mapping
        #[arg(long)]
        direct: bool,
    },

    /// Test connection to the CARG API
    Check,

    /// Validate the mapping and blueprint configuration files
    ValidateConfig,
}
