//! Depth-first dispatcher over the top-level statements of each source file.
//!
//! Classification is a pure [`DocGenerator::step`]; the recursion only acts
//! on its result, appending serialized records to a [`Collector`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::schema::DocEntry;

use super::facility::{NodeKind, TypeChecker};
use super::serialize::{serialize_class, serialize_function};

/// What to do with a class whose name does not resolve to a symbol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassSymbolPolicy {
    /// Emit nothing for the class
    #[default]
    Drop,
    /// Use the symbol attached to the declaration node, if any
    Fallback,
}

/// Ordered output of one generation run
#[derive(Debug, Default)]
pub struct Collector {
    entries: Vec<DocEntry>,
    current_file: Option<String>,
    stamp_file_names: bool,
}

impl Collector {
    pub fn new(stamp_file_names: bool) -> Self {
        Self {
            stamp_file_names,
            ..Default::default()
        }
    }

    /// Records pushed from here on belong to `file_name`
    pub fn begin_file(&mut self, file_name: &str) {
        self.current_file = Some(file_name.to_string());
    }

    pub fn push(&mut self, mut entry: DocEntry) {
        if self.stamp_file_names && entry.file_name.is_none() {
            entry.file_name = self.current_file.clone();
        }
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DocEntry> {
        self.entries
    }
}

/// Outcome of classifying one node
#[derive(Debug)]
enum Step<N, S> {
    Skip,
    Descend(Vec<N>),
    Function(S),
    Class(S),
}

/// Walks a checked program and serializes its functions and classes
pub struct DocGenerator<'c, C: TypeChecker> {
    checker: &'c C,
    class_policy: ClassSymbolPolicy,
    stamp_file_names: bool,
}

impl<'c, C: TypeChecker> DocGenerator<'c, C> {
    pub fn new(checker: &'c C) -> Self {
        Self {
            checker,
            class_policy: ClassSymbolPolicy::default(),
            stamp_file_names: true,
        }
    }

    pub fn with_class_policy(mut self, policy: ClassSymbolPolicy) -> Self {
        self.class_policy = policy;
        self
    }

    /// Stamp each top-level record with the name of its file
    pub fn with_file_names(mut self, enabled: bool) -> Self {
        self.stamp_file_names = enabled;
        self
    }

    /// Visit every statement of every non-declaration file in program order
    pub fn generate(&self) -> Result<Vec<DocEntry>> {
        let mut out = Collector::new(self.stamp_file_names);

        for file in self.checker.source_files() {
            if file.is_declaration_file {
                trace!(file = %file.file_name, "skipping declaration file");
                continue;
            }

            out.begin_file(&file.file_name);
            let before = out.len();
            for statement in file.statements {
                self.visit(statement, &mut out)?;
            }
            debug!(
                file = %file.file_name,
                entries = out.len() - before,
                "documented file"
            );
        }

        Ok(out.into_entries())
    }

    /// Classify `node` and append whatever it documents, recursing into
    /// transparent containers in source order
    pub fn visit(&self, node: C::Node, out: &mut Collector) -> Result<()> {
        match self.step(node) {
            Step::Skip => {}
            Step::Descend(children) => {
                for child in children {
                    self.visit(child, out)?;
                }
            }
            Step::Function(symbol) => out.push(serialize_function(self.checker, symbol)?),
            Step::Class(symbol) => out.push(serialize_class(self.checker, symbol)?),
        }
        Ok(())
    }

    fn step(&self, node: C::Node) -> Step<C::Node, C::Symbol> {
        match self.checker.kind(node) {
            NodeKind::Import | NodeKind::Ambient | NodeKind::Interface | NodeKind::Other => {
                Step::Skip
            }
            NodeKind::TypeAlias { aliased } => Step::Descend(vec![aliased]),
            NodeKind::VariableStatement { initializers } => {
                Step::Descend(initializers.into_iter().flatten().collect())
            }
            NodeKind::Module { body } => Step::Descend(body),
            NodeKind::FunctionExpression | NodeKind::FunctionDeclaration { .. } => {
                match self.resolve_symbol(node) {
                    Some(symbol) => Step::Function(symbol),
                    None => {
                        trace!(?node, "function has no symbol");
                        Step::Skip
                    }
                }
            }
            NodeKind::ClassDeclaration { name } => {
                let generic = self.resolve_symbol(node);
                let specific = name.and_then(|n| self.checker.symbol_at_location(n));
                match (specific, self.class_policy) {
                    (Some(symbol), _) => Step::Class(symbol),
                    (None, ClassSymbolPolicy::Fallback) => match generic {
                        Some(symbol) => Step::Class(symbol),
                        None => Step::Skip,
                    },
                    (None, ClassSymbolPolicy::Drop) => {
                        debug!(?node, "class name does not resolve, dropping");
                        Step::Skip
                    }
                }
            }
        }
    }

    /// Attached symbol first, then the symbol at the node's name
    fn resolve_symbol(&self, node: C::Node) -> Option<C::Symbol> {
        self.checker.node_symbol(node).or_else(|| {
            self.checker
                .name(node)
                .and_then(|name| self.checker.symbol_at_location(name))
        })
    }
}
