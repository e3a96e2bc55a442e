//! Program construction: the set of parsed source files a checker binds.
//!
//! Roots are read and parsed once. Unless resolution is disabled, relative
//! imports are followed and every dependency is placed before the file that
//! imports it.

mod resolve;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use tree_sitter::Tree;

use crate::checker::Checker;
use crate::config::CompilerOptions;
use crate::error::{DocgenError, Result};
use crate::fs_utils::{display_name, file_key};
use crate::lang::{is_declaration_file, Lang};
use crate::parsing::parse_source;
use crate::syntax::{container_statements, has_module_syntax, FileId, SyntaxNode};

pub use resolve::{import_specifiers, is_relative, resolve_module_name};

/// One parsed file of a program
#[derive(Debug)]
pub struct SourceFile {
    pub id: FileId,
    /// Display name used in output records
    pub file_name: String,
    pub path: PathBuf,
    pub lang: Lang,
    pub source: String,
    pub tree: Tree,
    pub is_declaration_file: bool,
}

impl SourceFile {
    fn parse(id: FileId, path: &Path, source: String) -> Result<Self> {
        let lang = Lang::from_path(path)?;
        let tree = parse_source(path, &source, lang)?;
        Ok(Self {
            id,
            file_name: display_name(path),
            path: path.to_path_buf(),
            lang,
            source,
            tree,
            is_declaration_file: is_declaration_file(path),
        })
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self.id, self.tree.root_node())
    }

    /// Top-level statements with export wrappers removed
    pub fn statements(&self) -> Vec<SyntaxNode<'_>> {
        container_statements(self.root())
    }

    /// Files with a top-level import or export have their own scope
    pub fn is_external_module(&self) -> bool {
        has_module_syntax(self.root())
    }
}

/// An ordered, immutable set of source files
#[derive(Debug)]
pub struct Program {
    files: Vec<SourceFile>,
    options: CompilerOptions,
}

impl Program {
    /// Build a program from in-memory sources; imports are not followed
    pub fn from_sources(sources: &[(&str, &str)], options: &CompilerOptions) -> Result<Self> {
        let files = sources
            .iter()
            .enumerate()
            .map(|(i, (name, text))| SourceFile::parse(FileId(i), Path::new(name), text.to_string()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            files,
            options: options.clone(),
        })
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Bind every file and return the query facility
    pub fn type_checker(&self) -> Checker<'_> {
        Checker::new(self)
    }
}

/// Read, parse and order the files reachable from `root_names`.
///
/// # Errors
///
/// - `FileNotFound` for a root that does not exist
/// - `UnsupportedLanguage` for a root with an unknown extension
/// - `ProgramFailure` when no root is left to build from
/// - `Io` / `ParseFailure` for files that cannot be read or parsed
pub fn create_program(root_names: &[PathBuf], options: &CompilerOptions) -> Result<Program> {
    let mut builder = ProgramBuilder {
        options,
        files: Vec::new(),
        seen: HashSet::new(),
    };

    let mut roots = 0;
    for root in root_names {
        if !root.is_file() {
            return Err(DocgenError::FileNotFound {
                path: root.display().to_string(),
            });
        }
        let lang = Lang::from_path(root)?;
        if lang.is_javascript() && !options.allow_js {
            warn!(file = %root.display(), "JavaScript file skipped, allow_js is off");
            continue;
        }
        builder.add_file(root)?;
        roots += 1;
    }

    if roots == 0 {
        return Err(DocgenError::ProgramFailure {
            message: "no input files".to_string(),
        });
    }

    debug!(
        roots,
        files = builder.files.len(),
        "program created"
    );
    Ok(Program {
        files: builder.files,
        options: options.clone(),
    })
}

struct ProgramBuilder<'o> {
    options: &'o CompilerOptions,
    files: Vec<SourceFile>,
    seen: HashSet<PathBuf>,
}

impl ProgramBuilder<'_> {
    /// Add `path` after its resolved imports, once
    fn add_file(&mut self, path: &Path) -> Result<()> {
        if !self.seen.insert(file_key(path)) {
            return Ok(());
        }

        let source = fs::read_to_string(path)?;
        let mut file = SourceFile::parse(FileId(0), path, source)?;

        if !self.options.no_resolve {
            for specifier in import_specifiers(file.tree.root_node(), &file.source) {
                match resolve_module_name(&specifier, path, self.options) {
                    Some(dependency) => {
                        trace!(from = %path.display(), to = %dependency.display(), "import resolved");
                        self.add_file(&dependency)?;
                    }
                    None => trace!(from = %path.display(), %specifier, "import not resolved"),
                }
            }
        }

        file.id = FileId(self.files.len());
        self.files.push(file);
        Ok(())
    }
}
