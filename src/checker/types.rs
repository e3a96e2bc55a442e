//! Types and signatures produced by the checker

use crate::syntax::{normalize_whitespace, SyntaxNode};

use super::binder::SymbolId;

/// The type of a symbol. Only callables and classes keep structure; every
/// other type is carried in its rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type<'p> {
    Function(Vec<Signature<'p>>),
    Class {
        name: String,
        construct: Vec<Signature<'p>>,
    },
    Named(String),
}

impl Type<'_> {
    pub fn any() -> Self {
        Type::Named("any".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<'p> {
    /// `None` for a class's implicit constructor
    pub declaration: Option<SyntaxNode<'p>>,
    /// Rendered `<T, U>` list, if the signature is generic
    pub type_parameters: Option<String>,
    pub parameters: Vec<SymbolId>,
    pub return_type: String,
}

/// Collapse a type annotation written over several lines into one line
pub fn compact_type_text(text: &str) -> String {
    let mut out = normalize_whitespace(text);
    for (from, to) in [
        ("< ", "<"),
        (" >", ">"),
        ("( ", "("),
        (" )", ")"),
        ("[ ", "["),
        (" ]", "]"),
        (" ,", ","),
        (",>", ">"),
        (",)", ")"),
    ] {
        out = out.replace(from, to);
    }
    out
}

/// Text of a `: T` annotation node without its colon
pub fn annotation_text(annotation: &str) -> String {
    let text = annotation.trim();
    let text = text.strip_prefix(':').unwrap_or(text);
    compact_type_text(text.trim())
}

/// Union of distinct types in first-seen order; `any` absorbs the rest
pub fn union_of(types: &[String]) -> String {
    if types.iter().any(|t| t == "any") {
        return "any".to_string();
    }

    let mut distinct: Vec<&str> = Vec::new();
    for ty in types {
        if !distinct.contains(&ty.as_str()) {
            distinct.push(ty);
        }
    }

    match distinct.len() {
        0 => "never".to_string(),
        _ => distinct.join(" | "),
    }
}

/// Element type of an array literal rendered as an array type
pub fn array_of(element: &str) -> String {
    if element.contains(' ') && !element.starts_with('{') {
        format!("({})[]", element)
    } else {
        format!("{}[]", element)
    }
}
