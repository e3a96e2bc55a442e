//! Documentation generation core.
//!
//! The dispatcher in [`visitor`] walks a checked program through the
//! [`TypeChecker`] facility and serializes every function and class it
//! reaches into [`DocEntry`] records.

mod facility;
mod serialize;
#[cfg(test)]
pub(crate) mod testing;
mod visitor;

use std::path::PathBuf;

use tracing::info;

pub use facility::{
    display_parts_to_string, DisplayPart, DisplayPartKind, NodeKind, SourceUnit, SyntaxView,
    TypeChecker,
};
pub use serialize::{serialize_class, serialize_function, serialize_signature, serialize_symbol};
pub use visitor::{ClassSymbolPolicy, Collector, DocGenerator};

use crate::config::{CompilerOptions, ExtractionConfig};
use crate::error::Result;
use crate::program::create_program;
use crate::schema::DocEntry;

/// Build a program from `file_names` and document it with default extraction
/// settings
pub fn generate_documentation(
    file_names: &[PathBuf],
    options: &CompilerOptions,
) -> Result<Vec<DocEntry>> {
    generate_documentation_with(file_names, options, &ExtractionConfig::default())
}

/// Build a program from `file_names` and document it
pub fn generate_documentation_with(
    file_names: &[PathBuf],
    options: &CompilerOptions,
    extraction: &ExtractionConfig,
) -> Result<Vec<DocEntry>> {
    let program = create_program(file_names, options)?;
    let checker = program.type_checker();

    let entries = DocGenerator::new(&checker)
        .with_class_policy(extraction.class_symbol_policy)
        .with_file_names(extraction.include_file_names)
        .generate()?;

    info!(
        files = program.source_files().len(),
        entries = entries.len(),
        "documentation generated"
    );
    Ok(entries)
}
