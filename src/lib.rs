//! tsdocgen: documentation records for TypeScript and JavaScript sources
//!
//! Builds a program from a set of root files (following relative imports),
//! binds and type-checks it with a tree-sitter backed checker, and emits one
//! [`DocEntry`] per documented function and class.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tsdocgen::{generate_documentation, CompilerOptions};
//!
//! let entries = generate_documentation(&[PathBuf::from("src/index.ts")], &CompilerOptions::default())?;
//! println!("{}", serde_json::to_string_pretty(&entries).unwrap());
//! # Ok::<(), tsdocgen::DocgenError>(())
//! ```

pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod docgen;
pub mod error;
pub mod fs_utils;
pub mod lang;
pub mod parsing;
pub mod program;
pub mod schema;
pub mod syntax;

// Re-export commonly used types
pub use checker::Checker;
pub use cli::{Cli, OutputFormat};
pub use config::{
    CompilerOptions, DocgenConfig, ExtractionConfig, ModuleResolutionKind, ScriptTarget,
};
pub use docgen::{
    generate_documentation, generate_documentation_with, ClassSymbolPolicy, DocGenerator,
    TypeChecker,
};
pub use error::{DocgenError, Result};
pub use lang::Lang;
pub use program::{create_program, Program, SourceFile};
pub use schema::{DocEntry, EntryKind, ParamEntry, SignatureEntry};
