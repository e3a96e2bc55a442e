//! Return type inference for unannotated functions.
//!
//! Literal types are widened, anything that would need call resolution or
//! control-flow narrowing is `any`.

use crate::syntax::{is_function_like, SyntaxNode};

use super::types::{annotation_text, array_of, compact_type_text, union_of, Type};
use super::{Checker, SymbolKind};

/// Nested identifier and initializer lookups followed before giving up
const MAX_INFERENCE_DEPTH: usize = 8;

#[derive(Debug, Default)]
struct FunctionExits<'p> {
    returns: Vec<SyntaxNode<'p>>,
    empty_return: bool,
    yields: Vec<Option<SyntaxNode<'p>>>,
}

impl<'p> Checker<'p> {
    pub(super) fn infer_return_type(&self, function: SyntaxNode<'p>) -> String {
        let is_async = has_token(function, "async");
        let is_generator = matches!(
            function.kind(),
            "generator_function_declaration" | "generator_function"
        ) || has_token(function, "*");

        let Some(body) = function.field("body") else {
            return "any".to_string();
        };

        if body.kind() != "statement_block" {
            let ty = self.expression_type(body);
            return if is_async { promise_of(&ty) } else { ty };
        }

        let mut exits = FunctionExits::default();
        self.collect_exits(body, &mut exits);

        let mut values: Vec<String> = exits
            .returns
            .iter()
            .map(|r| {
                let ty = self.expression_type(*r);
                if is_async {
                    unwrap_promise(&ty).to_string()
                } else {
                    ty
                }
            })
            .collect();

        let result = if values.is_empty() {
            "void".to_string()
        } else {
            if exits.empty_return && self.strict_null_checks() {
                values.push("undefined".to_string());
            }
            union_of(&values)
        };

        if is_generator {
            let yielded: Vec<String> = exits
                .yields
                .iter()
                .map(|y| match y {
                    Some(value) => self.expression_type(*value),
                    None => self.undefined_type(),
                })
                .collect();
            let kind = if is_async { "AsyncGenerator" } else { "Generator" };
            return format!("{}<{}, {}, unknown>", kind, union_of(&yielded), result);
        }

        if is_async {
            promise_of(&result)
        } else {
            result
        }
    }

    /// `return` and `yield` of this function, not of nested ones, in
    /// source order
    fn collect_exits(&self, node: SyntaxNode<'p>, exits: &mut FunctionExits<'p>) {
        for child in node.named_children() {
            match child.kind() {
                kind if is_function_like(kind) => {}
                "class_declaration" | "abstract_class_declaration" | "class" => {}
                "return_statement" => {
                    match child.named_children().into_iter().find(|c| c.kind() != "comment") {
                        Some(value) => exits.returns.push(value),
                        None => exits.empty_return = true,
                    }
                }
                "yield_expression" => {
                    let delegated = self.text(child).trim_start_matches("yield").trim_start().starts_with('*');
                    if !delegated {
                        exits.yields.push(child.named_children().into_iter().next());
                    }
                    self.collect_exits(child, exits);
                }
                _ => self.collect_exits(child, exits),
            }
        }
    }

    pub(super) fn expression_type(&self, expression: SyntaxNode<'p>) -> String {
        self.expression_type_at(expression, 0)
    }

    fn undefined_type(&self) -> String {
        if self.strict_null_checks() {
            "undefined".to_string()
        } else {
            "any".to_string()
        }
    }

    fn expression_type_at(&self, expression: SyntaxNode<'p>, depth: usize) -> String {
        if depth > MAX_INFERENCE_DEPTH {
            return "any".to_string();
        }
        let first_child = || expression.named_children().into_iter().next();

        match expression.kind() {
            "string" | "template_string" => "string".to_string(),
            "number" => "number".to_string(),
            "true" | "false" => "boolean".to_string(),
            "regex" => "RegExp".to_string(),
            "undefined" => self.undefined_type(),
            "null" => {
                if self.strict_null_checks() {
                    "null".to_string()
                } else {
                    "any".to_string()
                }
            }
            "array" => {
                let elements: Vec<String> = expression
                    .named_children()
                    .into_iter()
                    .filter(|e| e.kind() != "comment")
                    .map(|e| match e.kind() {
                        "spread_element" => "any".to_string(),
                        _ => self.expression_type_at(e, depth + 1),
                    })
                    .collect();
                if elements.is_empty() {
                    if self.strict_null_checks() {
                        "never[]".to_string()
                    } else {
                        "any[]".to_string()
                    }
                } else {
                    array_of(&union_of(&elements))
                }
            }
            "object" => self.object_literal_type(expression, depth),
            "new_expression" => match expression.field("constructor") {
                Some(ctor) if matches!(ctor.kind(), "identifier" | "member_expression") => {
                    let type_arguments = expression
                        .field("type_arguments")
                        .map(|t| compact_type_text(self.text(t)))
                        .unwrap_or_default();
                    format!("{}{}", self.text(ctor), type_arguments)
                }
                _ => "any".to_string(),
            },
            kind if is_function_like(kind) => {
                self.render_type(&Type::Function(vec![self.signature_of(expression)]))
            }
            "parenthesized_expression" | "non_null_expression" | "satisfies_expression" => {
                match first_child() {
                    Some(inner) => self.expression_type_at(inner, depth + 1),
                    None => "any".to_string(),
                }
            }
            "as_expression" => {
                let children = expression.named_children();
                match children.as_slice() {
                    [_, ty] => compact_type_text(self.text(*ty)),
                    // `x as const`
                    [inner] => self.expression_type_at(*inner, depth + 1),
                    _ => "any".to_string(),
                }
            }
            "await_expression" => match first_child() {
                Some(inner) => unwrap_promise(&self.expression_type_at(inner, depth + 1)).to_string(),
                None => "any".to_string(),
            },
            "unary_expression" => {
                let operator = expression.field("operator").map(|o| self.text(o)).unwrap_or("");
                match operator {
                    "!" | "delete" => "boolean".to_string(),
                    "typeof" => "string".to_string(),
                    "void" => self.undefined_type(),
                    _ => "number".to_string(),
                }
            }
            "update_expression" => "number".to_string(),
            "binary_expression" => self.binary_type(expression, depth),
            "ternary_expression" => {
                let branches: Vec<String> = ["consequence", "alternative"]
                    .iter()
                    .filter_map(|f| expression.field(f))
                    .map(|b| self.expression_type_at(b, depth + 1))
                    .collect();
                union_of(&branches)
            }
            "identifier" => self.identifier_type(expression, depth),
            _ => "any".to_string(),
        }
    }

    fn binary_type(&self, expression: SyntaxNode<'p>, depth: usize) -> String {
        let operator = expression.field("operator").map(|o| self.text(o)).unwrap_or("");
        let side = |field: &str| {
            expression
                .field(field)
                .map(|n| self.expression_type_at(n, depth + 1))
                .unwrap_or_else(|| "any".to_string())
        };

        match operator {
            "==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" | "instanceof" | "in" => {
                "boolean".to_string()
            }
            "+" => {
                let (left, right) = (side("left"), side("right"));
                if left == "string" || right == "string" {
                    "string".to_string()
                } else if left == "number" && right == "number" {
                    "number".to_string()
                } else {
                    "any".to_string()
                }
            }
            "-" | "*" | "/" | "%" | "**" | "<<" | ">>" | ">>>" | "&" | "|" | "^" => {
                "number".to_string()
            }
            "&&" | "||" | "??" => union_of(&[side("left"), side("right")]),
            _ => "any".to_string(),
        }
    }

    /// `{ a: number; b: string; }`
    fn object_literal_type(&self, object: SyntaxNode<'p>, depth: usize) -> String {
        let mut members = Vec::new();

        for member in object.named_children() {
            match member.kind() {
                "pair" => {
                    let (Some(key), Some(value)) = (member.field("key"), member.field("value")) else {
                        continue;
                    };
                    if key.kind() == "computed_property_name" {
                        continue;
                    }
                    members.push(format!(
                        "{}: {}",
                        self.text(key),
                        self.expression_type_at(value, depth + 1)
                    ));
                }
                "shorthand_property_identifier" => {
                    members.push(format!(
                        "{}: {}",
                        self.text(member),
                        self.identifier_type(member, depth + 1)
                    ));
                }
                "method_definition" => {
                    let Some(name) = member.field("name") else {
                        continue;
                    };
                    let signature = self.signature_of(member);
                    members.push(format!(
                        "{}{}",
                        self.text(name),
                        self.signature_to_string(&signature, false)
                    ));
                }
                _ => {}
            }
        }

        if members.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {}; }}", members.join("; "))
        }
    }

    /// Parameters of enclosing functions, then local declarations of
    /// enclosing blocks, then the bound scopes
    fn identifier_type(&self, identifier: SyntaxNode<'p>, depth: usize) -> String {
        let name = self.text(identifier);
        match name {
            "undefined" => return self.undefined_type(),
            "NaN" | "Infinity" => return "number".to_string(),
            _ => {}
        }

        let mut current = identifier.parent();
        while let Some(node) = current {
            if is_function_like(node.kind()) {
                for param in self.table.parameters(node) {
                    let data = self.table.symbol(*param);
                    if data.name == name {
                        if let Some(declaration) = data.value_declaration {
                            return self.parameter_type(declaration, name);
                        }
                    }
                }
            }
            if node.kind() == "statement_block" {
                if let Some(declarator) = self.local_declarator(node, name) {
                    return self.declarator_type(declarator, depth);
                }
            }
            current = node.parent();
        }

        let Some(symbol) = self.table.resolve(name, identifier) else {
            return "any".to_string();
        };
        let data = self.table.symbol(symbol);
        match (data.kind, data.value_declaration) {
            (SymbolKind::Variable, Some(declarator)) => self.declarator_type(declarator, depth),
            (SymbolKind::Function, Some(_)) => self.render_type(&self.type_of_symbol(symbol)),
            (SymbolKind::Class | SymbolKind::Namespace | SymbolKind::Enum, Some(_)) => {
                format!("typeof {}", data.name)
            }
            _ => "any".to_string(),
        }
    }

    fn local_declarator(&self, block: SyntaxNode<'p>, name: &str) -> Option<SyntaxNode<'p>> {
        block
            .named_children()
            .into_iter()
            .filter(|s| matches!(s.kind(), "lexical_declaration" | "variable_declaration"))
            .flat_map(|s| s.named_children())
            .filter(|d| d.kind() == "variable_declarator")
            .find(|d| {
                d.field("name")
                    .map(|n| n.kind() == "identifier" && self.text(n) == name)
                    .unwrap_or(false)
            })
    }

    fn declarator_type(&self, declarator: SyntaxNode<'p>, depth: usize) -> String {
        if let Some(annotation) = declarator.field("type") {
            return annotation_text(self.text(annotation));
        }
        match declarator.field("value") {
            Some(value) => self.expression_type_at(value, depth + 1),
            None => "any".to_string(),
        }
    }
}

/// True if `node` has the anonymous token `token` before its body
fn has_token(node: SyntaxNode<'_>, token: &str) -> bool {
    let mut cursor = node.node.walk();
    let found = node
        .node
        .children(&mut cursor)
        .take_while(|c| c.kind() != "statement_block" && c.kind() != "formal_parameters")
        .any(|c| !c.is_named() && c.kind() == token);
    found
}

fn unwrap_promise(ty: &str) -> &str {
    ty.strip_prefix("Promise<")
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(ty)
}

fn promise_of(ty: &str) -> String {
    if ty.starts_with("Promise<") {
        ty.to_string()
    } else {
        format!("Promise<{}>", ty)
    }
}
