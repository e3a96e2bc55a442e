//! Import specifier collection and relative module resolution

use std::path::{Path, PathBuf};

use tree_sitter::Node;

use crate::config::CompilerOptions;
use crate::fs_utils::clean_path;
use crate::syntax::{node_text, trim_quotes};

const TS_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts"];
const JS_EXTENSIONS: &[&str] = &["js", "jsx"];

/// Module specifiers of a file's top-level imports and re-exports, in
/// source order
pub fn import_specifiers(root: Node<'_>, source: &str) -> Vec<String> {
    let mut specifiers = Vec::new();
    let mut cursor = root.walk();

    for statement in root.named_children(&mut cursor) {
        let source_node = match statement.kind() {
            "import_statement" => statement
                .child_by_field_name("source")
                .or_else(|| require_clause_source(statement)),
            "export_statement" => statement.child_by_field_name("source"),
            _ => None,
        };
        if let Some(node) = source_node {
            let text = trim_quotes(node_text(&node, source));
            if !text.is_empty() {
                specifiers.push(text.to_string());
            }
        }
    }

    specifiers
}

/// `import x = require("./y")`
fn require_clause_source(statement: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = statement.walk();
    let clause = statement
        .named_children(&mut cursor)
        .find(|c| c.kind() == "import_require_clause")?;
    clause.child_by_field_name("source").or_else(|| {
        let mut inner = clause.walk();
        let found = clause.named_children(&mut inner).find(|c| c.kind() == "string");
        found
    })
}

pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Resolve a relative specifier against the importing file.
///
/// Bare specifiers (packages) are not resolved.
pub fn resolve_module_name(
    specifier: &str,
    containing_file: &Path,
    options: &CompilerOptions,
) -> Option<PathBuf> {
    if !is_relative(specifier) {
        return None;
    }

    let dir = containing_file.parent().unwrap_or_else(|| Path::new(""));
    let base = clean_path(&dir.join(specifier));

    let mut extensions: Vec<&str> = TS_EXTENSIONS.to_vec();
    if options.allow_js {
        extensions.extend_from_slice(JS_EXTENSIONS);
    }

    // Specifier written with its extension
    if base.is_file() && has_source_extension(&base, &extensions) {
        return Some(base);
    }

    // ESM style: `./util.js` refers to `./util.ts`
    if let Some(stem) = strip_js_extension(&base) {
        if let Some(found) = try_extensions(&stem, &extensions) {
            return Some(found);
        }
    }

    if let Some(found) = try_extensions(&base, &extensions) {
        return Some(found);
    }

    if options.module_resolution.resolves_directory_index() && base.is_dir() {
        return try_extensions(&base.join("index"), &extensions);
    }

    None
}

fn try_extensions(base: &Path, extensions: &[&str]) -> Option<PathBuf> {
    extensions.iter().find_map(|ext| {
        let mut candidate = base.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}

fn has_source_extension(path: &Path, extensions: &[&str]) -> bool {
    let name = path.to_string_lossy();
    extensions
        .iter()
        .chain(["mts", "cts"].iter())
        .any(|ext| name.ends_with(&format!(".{}", ext)))
}

fn strip_js_extension(path: &Path) -> Option<PathBuf> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") | Some("jsx") | Some("mjs") | Some("cjs") => Some(path.with_extension("")),
        _ => None,
    }
}
