//! Syntax-tree handles and helpers shared by the binder, the checker and the
//! documentation dispatcher.
//!
//! tree-sitter wraps exported declarations in `export_statement` and some
//! namespace statements in `expression_statement`. TypeScript treats both as
//! modifiers of the declaration, so the helpers here unwrap them before a
//! statement is classified.

use tree_sitter::Node;

use crate::docgen::NodeKind;

/// Index of a source file inside a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

/// A node of one of the program's parsed files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyntaxNode<'t> {
    pub file: FileId,
    pub node: Node<'t>,
}

impl<'t> SyntaxNode<'t> {
    pub fn new(file: FileId, node: Node<'t>) -> Self {
        Self { file, node }
    }

    /// Another node of the same file
    pub fn with(&self, node: Node<'t>) -> Self {
        Self {
            file: self.file,
            node,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn field(&self, name: &str) -> Option<Self> {
        self.node.child_by_field_name(name).map(|n| self.with(n))
    }

    pub fn parent(&self) -> Option<Self> {
        self.node.parent().map(|n| self.with(n))
    }

    pub fn named_children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|n| self.with(n))
            .collect()
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        node_text(&self.node, source)
    }
}

// ============================================================================
// Text Extraction
// ============================================================================

/// Get text content of a node
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Normalize whitespace: collapse multiple spaces/newlines to single space
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip the quotes of a string literal node's text
pub fn trim_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

// ============================================================================
// Statements
// ============================================================================

/// The node TypeScript would see for a statement: the declaration of an
/// `export <declaration>` statement, or the namespace inside an expression
/// statement. Anything else is returned unchanged.
pub fn unwrap_statement(node: Node<'_>) -> Node<'_> {
    match node.kind() {
        "export_statement" => node.child_by_field_name("declaration").unwrap_or(node),
        "expression_statement" => match node.named_child(0) {
            Some(inner) if inner.kind() == "internal_module" => inner,
            _ => node,
        },
        _ => node,
    }
}

/// Statements of a `program` or namespace body, comments removed and
/// export wrappers unwrapped, in source order
pub fn container_statements<'t>(container: SyntaxNode<'t>) -> Vec<SyntaxNode<'t>> {
    container
        .named_children()
        .into_iter()
        .filter(|s| s.kind() != "comment")
        .map(|s| s.with(unwrap_statement(s.node)))
        .collect()
}

/// True if the statement list marks the file as an ES module
pub fn has_module_syntax(root: SyntaxNode<'_>) -> bool {
    root.named_children()
        .iter()
        .any(|s| matches!(s.kind(), "import_statement" | "export_statement"))
}

// ============================================================================
// Classification
// ============================================================================

/// Node kinds that carry a parameter list and a signature
pub fn is_function_like(kind: &str) -> bool {
    matches!(
        kind,
        "function_declaration"
            | "generator_function_declaration"
            | "function_signature"
            | "arrow_function"
            | "function_expression"
            | "function"
            | "generator_function"
            | "method_definition"
            | "method_signature"
            | "abstract_method_signature"
    )
}

/// Classify a (statement-unwrapped) node into the kinds the documentation
/// dispatcher distinguishes.
pub fn classify(node: SyntaxNode<'_>) -> NodeKind<SyntaxNode<'_>> {
    if node.node.is_error() || node.node.is_missing() {
        return NodeKind::Ambient;
    }

    match node.kind() {
        "import_statement" | "import_alias" => NodeKind::Import,
        "ambient_declaration" => NodeKind::Ambient,
        "interface_declaration" => NodeKind::Interface,
        "type_alias_declaration" => match node.field("value") {
            Some(aliased) => NodeKind::TypeAlias { aliased },
            None => NodeKind::Other,
        },
        "lexical_declaration" | "variable_declaration" => NodeKind::VariableStatement {
            initializers: node
                .named_children()
                .into_iter()
                .filter(|d| d.kind() == "variable_declarator")
                .map(|d| d.field("value"))
                .collect(),
        },
        "internal_module" | "module" => NodeKind::Module {
            body: node
                .field("body")
                .map(container_statements)
                .unwrap_or_default(),
        },
        "arrow_function" | "function_expression" | "generator_function" => {
            NodeKind::FunctionExpression
        }
        "function" if node.node.is_named() => NodeKind::FunctionExpression,
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            NodeKind::FunctionDeclaration {
                name: node.field("name"),
            }
        }
        "class_declaration" | "abstract_class_declaration" => NodeKind::ClassDeclaration {
            name: node.field("name"),
        },
        _ => NodeKind::Other,
    }
}
