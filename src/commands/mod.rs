//! Command modules for the tsdocgen CLI
//!
//! Each command module implements a single top-level command:
//! - `generate` - Build a program and print its documentation records
//! - `config` - Show the effective configuration and where it came from
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext` for output format and configuration.

pub mod config;
pub mod generate;

pub use config::run_config;
pub use generate::run_generate;

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::DocgenConfig;
use crate::error::Result;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
    /// Explicit `--config` path
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Create a new CommandContext from CLI args
    pub fn from_cli(format: OutputFormat, verbose: bool, config_path: Option<PathBuf>) -> Self {
        Self {
            format,
            verbose,
            config_path,
        }
    }

    /// Configuration for this invocation
    pub fn load_config(&self) -> Result<DocgenConfig> {
        DocgenConfig::load(self.config_path.as_deref())
    }
}
