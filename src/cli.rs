//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Documentation record extractor for TypeScript and JavaScript
#[derive(Parser, Debug)]
#[command(name = "tsdocgen")]
#[command(about = "Extract documentation records for the functions and classes of TypeScript sources")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "json", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the discovered one
    #[arg(long, value_name = "PATH", global = true, env = "TSDOCGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

// ============================================
// Main Commands Enum
// ============================================

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate documentation records for source files or directories
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}

// ============================================
// Generate Command
// ============================================

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source files or directories to document
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// tsconfig.json whose compilerOptions replace the [compiler] section
    #[arg(short, long, value_name = "TSCONFIG")]
    pub project: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Enable strict type-checking options
    #[arg(long)]
    pub strict: bool,

    /// Include JavaScript sources
    #[arg(long)]
    pub allow_js: bool,

    /// Do not follow relative imports
    #[arg(long)]
    pub no_resolve: bool,

    /// Fall back to the declaration's own symbol when a class name does not resolve
    #[arg(long)]
    pub class_fallback: bool,

    /// Leave `fileName` out of the records
    #[arg(long)]
    pub no_file_names: bool,

    /// Maximum directory depth when walking directory inputs
    #[arg(long, default_value = "10")]
    pub max_depth: usize,
}

// ============================================
// Config Command
// ============================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub operation: ConfigOperation,
}

#[derive(Subcommand, Debug)]
pub enum ConfigOperation {
    /// Print the effective configuration as TOML
    Show,
    /// Print the path of the configuration file in use
    Path,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary of each record
    #[value(alias = "pretty")]
    Text,
    /// Pretty-printed JSON array of records
    #[default]
    Json,
}

// ============================================
// Helper Implementations
// ============================================

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
