//! Error types and exit codes for tsdocgen

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for documentation generation
#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported language for extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Failed to parse file: {message}")]
    ParseFailure { message: String },

    /// A symbol reached serialization without a value declaration
    #[error("Symbol '{name}' has no value declaration")]
    UnresolvedSymbol { name: String },

    #[error("Failed to build program: {message}")]
    ProgramFailure { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Failed to write output: {message}")]
    OutputFailure { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocgenError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: File not found / IO error
    /// - 2: Unsupported language
    /// - 3: Parse failure / program construction failure
    /// - 4: Internal extraction failure
    /// - 5: Configuration or output error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::UnsupportedLanguage { .. } => ExitCode::from(2),
            Self::ParseFailure { .. } => ExitCode::from(3),
            Self::ProgramFailure { .. } => ExitCode::from(3),
            Self::UnresolvedSymbol { .. } => ExitCode::from(4),
            Self::ConfigError { .. } => ExitCode::from(5),
            Self::OutputFailure { .. } => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for tsdocgen operations
pub type Result<T> = std::result::Result<T, DocgenError>;
