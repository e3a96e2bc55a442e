//! JSDoc comment parsing and lookup.
//!
//! A declaration's JSDoc is every `/** ... */` block directly above its
//! host node: the export statement of an exported declaration, or the
//! variable statement of a single-declarator initializer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::docgen::DisplayPart;
use crate::syntax::SyntaxNode;

use super::Checker;

static TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(\w+)\s*(.*)$").expect("tag pattern is valid"));
static PARAM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:\{([^}]*)\}\s*)?(\[[^\]]*\]|[\w$.]+)\s*(.*)$").expect("param pattern is valid")
});
static TYPE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\{([^}]*)\}\s*(.*)$").expect("type pattern is valid"));
static INLINE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{@(?:link|linkcode|linkplain)\s+([^}\s|]+)\s*(?:\|\s*)?([^}]*)\}")
        .expect("link pattern is valid")
});

/// A parsed `/** ... */` block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDoc {
    /// Free text before the first tag
    pub comment: String,
    pub tags: Vec<JsDocTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    /// `{type}` right after the tag name
    pub type_expression: Option<String>,
    /// Parameter name of `@param`
    pub parameter: Option<String>,
    pub comment: String,
}

impl JsDocTag {
    pub fn is_param(&self) -> bool {
        matches!(self.name.as_str(), "param" | "arg" | "argument")
    }

    pub fn is_returns(&self) -> bool {
        matches!(self.name.as_str(), "returns" | "return")
    }
}

/// Parse a comment's raw text; `None` unless it is a JSDoc block
pub fn parse_jsdoc(raw: &str) -> Option<JsDoc> {
    let body = raw.trim().strip_prefix("/**")?.strip_suffix("*/")?;
    if raw.trim() == "/**/" {
        return None;
    }

    let mut doc = JsDoc::default();
    let mut comment_lines: Vec<&str> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in body.lines() {
        let line = clean_line(line);
        if let Some(caps) = TAG_LINE.captures(line) {
            if let Some((name, lines)) = current.take() {
                doc.tags.push(build_tag(name, &lines.join("\n")));
            }
            current = Some((caps[1].to_string(), vec![caps[2].to_string()]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line.to_string());
        } else {
            comment_lines.push(line);
        }
    }
    if let Some((name, lines)) = current {
        doc.tags.push(build_tag(name, &lines.join("\n")));
    }

    doc.comment = comment_lines.join("\n").trim().to_string();
    Some(doc)
}

/// Strip the leading `*` decoration of one comment line
fn clean_line(line: &str) -> &str {
    let trimmed = line.trim_start();
    let trimmed = match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    };
    trimmed.trim_end()
}

fn build_tag(name: String, rest: &str) -> JsDocTag {
    let rest = rest.trim();
    let mut tag = JsDocTag {
        name,
        ..Default::default()
    };

    if tag.is_param() {
        if let Some(caps) = PARAM_TAG.captures(rest) {
            tag.type_expression = caps.get(1).map(|m| m.as_str().trim().to_string());
            let raw_name = &caps[2];
            let name = raw_name
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split('=')
                .next()
                .unwrap_or(raw_name)
                .trim();
            tag.parameter = Some(name.to_string());
            tag.comment = strip_dash(&caps[3]).to_string();
            return tag;
        }
    }

    match TYPE_PREFIX.captures(rest) {
        Some(caps) => {
            tag.type_expression = Some(caps[1].trim().to_string());
            tag.comment = strip_dash(&caps[2]).to_string();
        }
        None => tag.comment = strip_dash(rest).to_string(),
    }
    tag
}

fn strip_dash(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix("- ")
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text)
        .trim()
}

/// Render comment text into display parts; line breaks and inline links
/// become their own parts
pub fn comment_parts(comment: &str) -> Vec<DisplayPart> {
    let mut parts = Vec::new();

    for (i, line) in comment.split('\n').enumerate() {
        if i > 0 {
            parts.push(DisplayPart::line_break());
        }

        let mut last = 0;
        for caps in INLINE_LINK.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                parts.push(DisplayPart::text(&line[last..whole.start()]));
            }
            let label = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            let text = if label.is_empty() { &caps[1] } else { label };
            parts.push(DisplayPart::link_text(text));
            last = whole.end();
        }
        if last < line.len() {
            parts.push(DisplayPart::text(&line[last..]));
        }
    }

    parts
}

impl<'p> Checker<'p> {
    /// JSDoc blocks attached to a declaration, in source order
    pub(super) fn jsdocs(&self, declaration: SyntaxNode<'p>) -> Vec<JsDoc> {
        let Some(host) = self.doc_host(declaration) else {
            return Vec::new();
        };

        let mut docs = Vec::new();
        let mut sibling = host.node.prev_sibling();
        while let Some(node) = sibling {
            match node.kind() {
                "comment" => {
                    if let Some(doc) = parse_jsdoc(self.text(host.with(node))) {
                        docs.push(doc);
                    }
                }
                "decorator" => {}
                _ => break,
            }
            sibling = node.prev_sibling();
        }
        docs.reverse();
        docs
    }

    /// The node whose leading comments document `declaration`
    fn doc_host(&self, declaration: SyntaxNode<'p>) -> Option<SyntaxNode<'p>> {
        match declaration.kind() {
            "arrow_function" | "function_expression" | "function" | "generator_function" => {
                let declarator = declaration
                    .parent()
                    .filter(|p| p.kind() == "variable_declarator")?;
                self.single_declarator_statement(declarator)
            }
            "variable_declarator" => self.single_declarator_statement(declaration),
            "required_parameter" | "optional_parameter" | "identifier" | "assignment_pattern"
            | "rest_pattern" | "object_pattern" | "array_pattern" => None,
            _ => Some(outer_statement(declaration)),
        }
    }

    fn single_declarator_statement(&self, declarator: SyntaxNode<'p>) -> Option<SyntaxNode<'p>> {
        let statement = declarator
            .parent()
            .filter(|s| matches!(s.kind(), "lexical_declaration" | "variable_declaration"))?;
        let declarators = statement
            .named_children()
            .into_iter()
            .filter(|d| d.kind() == "variable_declarator")
            .count();
        (declarators == 1).then(|| outer_statement(statement))
    }

    /// The JSDoc block nearest the declaration. Earlier stacked blocks, such
    /// as a file header, do not document it.
    pub(super) fn jsdoc(&self, declaration: SyntaxNode<'p>) -> Option<JsDoc> {
        self.jsdocs(declaration).pop()
    }

    /// Comment text of the declaration's JSDoc block
    pub(super) fn declaration_comment(&self, declaration: SyntaxNode<'p>) -> String {
        self.jsdoc(declaration).map(|d| d.comment).unwrap_or_default()
    }

    /// `@param` tags of the function owning `param` that name it
    pub(super) fn param_tags(&self, param: SyntaxNode<'p>, name: &str) -> Vec<JsDocTag> {
        let Some(function) = owning_function(param) else {
            return Vec::new();
        };
        self.jsdoc(function)
            .map(|d| d.tags)
            .unwrap_or_default()
            .into_iter()
            .filter(|t| t.is_param() && t.parameter.as_deref() == Some(name))
            .collect()
    }

    /// `@returns {T}` of a declaration, used for JavaScript sources
    pub(super) fn returns_tag_type(&self, declaration: SyntaxNode<'p>) -> Option<String> {
        self.jsdoc(declaration)?
            .tags
            .into_iter()
            .find(|t| t.is_returns())
            .and_then(|t| t.type_expression)
    }
}

/// Export and ambient wrappers carry the comments of what they wrap
fn outer_statement(node: SyntaxNode<'_>) -> SyntaxNode<'_> {
    let mut host = node;
    while let Some(parent) = host.parent() {
        if matches!(parent.kind(), "export_statement" | "ambient_declaration")
            || (parent.kind() == "expression_statement" && host.kind() == "internal_module")
        {
            host = parent;
        } else {
            break;
        }
    }
    host
}

/// Function-like node a parameter belongs to
fn owning_function(param: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let parent = param.parent()?;
    if parent.kind() == "formal_parameters" {
        parent.parent()
    } else {
        Some(parent)
    }
}
