//! Parsing of a single source text into a tree-sitter tree.
//!
//! The program builder is the only caller in the crate; it parses every file
//! exactly once before any symbol is bound.

use std::path::Path;

use tracing::debug;
use tree_sitter::Tree;

use crate::error::DocgenError;
use crate::lang::Lang;

/// Parse source code into a tree-sitter tree.
///
/// # Errors
///
/// Returns `DocgenError::ParseFailure` if:
/// - The language cannot be set on the parser
/// - The parser gives up on the source
///
/// Syntax errors are not failures: tree-sitter recovers and marks the
/// affected ranges with `ERROR`/`MISSING` nodes, which documentation
/// traversal skips.
pub fn parse_source(file_path: &Path, source: &str, lang: Lang) -> Result<Tree, DocgenError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| DocgenError::ParseFailure {
            message: format!(
                "Failed to set language for {}: {:?}",
                file_path.display(),
                e
            ),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| DocgenError::ParseFailure {
            message: format!("Failed to parse file: {}", file_path.display()),
        })?;

    if tree.root_node().has_error() {
        debug!(
            file = %file_path.display(),
            lang = lang.name(),
            "source has syntax errors"
        );
    }

    Ok(tree)
}
