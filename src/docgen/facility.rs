//! The compiler facility the documentation core consumes.
//!
//! The core never touches tree-sitter or the binder directly. It sees nodes
//! through [`SyntaxView`] and symbols, types and signatures through
//! [`TypeChecker`], which keeps the traversal testable against a fake.

use std::fmt;

/// Node kinds the dispatcher distinguishes. Anything it does not document
/// or descend into is `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<N> {
    /// `import ...` and `import x = require(...)`
    Import,
    /// `declare ...`, parse-error and missing nodes
    Ambient,
    Interface,
    /// `type X = <aliased>`
    TypeAlias { aliased: N },
    /// `const`/`let`/`var`; one entry per declarator
    VariableStatement { initializers: Vec<Option<N>> },
    /// `namespace`/`module` with the statements of its body
    Module { body: Vec<N> },
    /// Arrow functions, function and generator expressions
    FunctionExpression,
    FunctionDeclaration { name: Option<N> },
    ClassDeclaration { name: Option<N> },
    Other,
}

/// Read-only view of the syntax tree
pub trait SyntaxView {
    type Node: Copy + fmt::Debug;

    fn kind(&self, node: Self::Node) -> NodeKind<Self::Node>;

    /// The declaration's name node, if it has one
    fn name(&self, node: Self::Node) -> Option<Self::Node>;
}

/// One file of the program as the dispatcher sees it
#[derive(Debug, Clone)]
pub struct SourceUnit<N> {
    /// Display name, as given to the program or as resolved from an import
    pub file_name: String,
    pub is_declaration_file: bool,
    /// Top-level statements in source order
    pub statements: Vec<N>,
}

/// Symbol, type and signature queries over a bound program
pub trait TypeChecker: SyntaxView {
    type Symbol: Copy + fmt::Debug;
    type Type;
    type Signature;

    /// Files in program order
    fn source_files(&self) -> Vec<SourceUnit<Self::Node>>;

    /// The symbol the binder attached to a declaration node
    fn node_symbol(&self, node: Self::Node) -> Option<Self::Symbol>;

    /// The symbol a name refers to at its location
    fn symbol_at_location(&self, location: Self::Node) -> Option<Self::Symbol>;

    fn symbol_name(&self, symbol: Self::Symbol) -> String;
    fn value_declaration(&self, symbol: Self::Symbol) -> Option<Self::Node>;

    fn type_of_symbol_at_location(&self, symbol: Self::Symbol, location: Self::Node) -> Self::Type;
    fn type_to_string(&self, ty: &Self::Type) -> String;

    fn call_signatures(&self, ty: &Self::Type) -> Vec<Self::Signature>;
    fn construct_signatures(&self, ty: &Self::Type) -> Vec<Self::Signature>;
    fn signature_parameters(&self, signature: &Self::Signature) -> Vec<Self::Symbol>;
    fn signature_return_type(&self, signature: &Self::Signature) -> Self::Type;

    fn symbol_documentation(&self, symbol: Self::Symbol) -> Vec<DisplayPart>;
    fn signature_documentation(&self, signature: &Self::Signature) -> Vec<DisplayPart>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPartKind {
    Text,
    LineBreak,
    /// Rendered text of an inline `{@link ...}` tag
    LinkText,
}

/// A fragment of rendered documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPart {
    pub text: String,
    pub kind: DisplayPartKind,
}

impl DisplayPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DisplayPartKind::Text,
        }
    }

    pub fn line_break() -> Self {
        Self {
            text: "\n".to_string(),
            kind: DisplayPartKind::LineBreak,
        }
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DisplayPartKind::LinkText,
        }
    }
}

/// Concatenate the text of every part, in order
pub fn display_parts_to_string(parts: &[DisplayPart]) -> String {
    parts.iter().map(|p| p.text.as_str()).collect()
}
