//! Type checker over a bound program.
//!
//! Implements the documentation facility: symbols come from the binder,
//! types are read from annotations or inferred from simple expressions,
//! and documentation from JSDoc blocks.

mod binder;
mod infer;
mod jsdoc;
mod types;

use tracing::trace;

use crate::docgen::{DisplayPart, NodeKind, SourceUnit, SyntaxView, TypeChecker};
use crate::program::Program;
use crate::syntax::{classify, is_function_like, SyntaxNode};

pub use binder::{bind_program, SymbolData, SymbolId, SymbolKind, SymbolTable};
pub use jsdoc::{comment_parts, parse_jsdoc, JsDoc, JsDocTag};
pub use types::{annotation_text, compact_type_text, Signature, Type};

/// Base classes followed when a class inherits its constructor
const MAX_HERITAGE_DEPTH: usize = 16;

/// Query facility over one program
pub struct Checker<'p> {
    program: &'p Program,
    table: SymbolTable<'p>,
}

impl<'p> Checker<'p> {
    pub fn new(program: &'p Program) -> Self {
        let table = bind_program(program);
        trace!(
            files = program.source_files().len(),
            symbols = table.symbol_count(),
            "program bound"
        );
        Self { program, table }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn symbol_table(&self) -> &SymbolTable<'p> {
        &self.table
    }

    fn text(&self, node: SyntaxNode<'p>) -> &'p str {
        node.text(&self.program.file(node.file).source)
    }

    fn strict_null_checks(&self) -> bool {
        self.program.options().strict_null_checks()
    }

    fn is_javascript(&self, node: SyntaxNode<'p>) -> bool {
        self.program.file(node.file).lang.is_javascript()
    }

    /// The type of a symbol at its value declaration
    pub fn type_of_symbol(&self, symbol: SymbolId) -> Type<'p> {
        let data = self.table.symbol(symbol);
        let Some(declaration) = data.value_declaration else {
            return Type::Named(data.name.clone());
        };

        match data.kind {
            SymbolKind::Function => Type::Function(self.function_signatures(data)),
            SymbolKind::Class => Type::Class {
                name: data.name.clone(),
                construct: self.construct_signatures_of(declaration, 0),
            },
            SymbolKind::Namespace | SymbolKind::Enum => {
                Type::Named(format!("typeof {}", data.name))
            }
            SymbolKind::Parameter => Type::Named(self.parameter_type(declaration, &data.name)),
            SymbolKind::Variable => self.variable_type(declaration),
            SymbolKind::Interface | SymbolKind::TypeAlias => Type::Named(data.name.clone()),
        }
    }

    /// Overload declarations when the symbol has any, else its implementations
    fn function_signatures(&self, data: &SymbolData<'p>) -> Vec<Signature<'p>> {
        let declarations: Vec<SyntaxNode<'p>> = data
            .declarations
            .iter()
            .copied()
            .filter(|d| is_function_like(d.kind()))
            .collect();
        let overloads: Vec<SyntaxNode<'p>> = declarations
            .iter()
            .copied()
            .filter(|d| d.field("body").is_none())
            .collect();

        let chosen = if !overloads.is_empty() && overloads.len() < declarations.len() {
            overloads
        } else {
            declarations
        };
        chosen.into_iter().map(|d| self.signature_of(d)).collect()
    }

    fn signature_of(&self, declaration: SyntaxNode<'p>) -> Signature<'p> {
        Signature {
            declaration: Some(declaration),
            type_parameters: declaration
                .field("type_parameters")
                .map(|tp| compact_type_text(self.text(tp))),
            parameters: self.table.parameters(declaration).to_vec(),
            return_type: self.return_type_of(declaration),
        }
    }

    fn return_type_of(&self, declaration: SyntaxNode<'p>) -> String {
        if let Some(annotation) = declaration.field("return_type") {
            return annotation_text(self.text(annotation));
        }
        if self.is_javascript(declaration) {
            if let Some(ty) = self.returns_tag_type(declaration) {
                return ty;
            }
        }
        if declaration.field("body").is_none() {
            return "any".to_string();
        }
        self.infer_return_type(declaration)
    }

    fn constructors(&self, class: SyntaxNode<'p>) -> Vec<SyntaxNode<'p>> {
        let Some(body) = class.field("body") else {
            return Vec::new();
        };
        body.named_children()
            .into_iter()
            .filter(|m| matches!(m.kind(), "method_definition" | "method_signature"))
            .filter(|m| {
                m.field("name")
                    .map(|n| self.text(n) == "constructor")
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Constructor overloads, else the implementation, else the base
    /// class's signatures, else one implicit parameterless signature
    fn construct_signatures_of(&self, class: SyntaxNode<'p>, depth: usize) -> Vec<Signature<'p>> {
        let instance = self.instance_type(class);
        let type_parameters = class
            .field("type_parameters")
            .map(|tp| compact_type_text(self.text(tp)));

        let constructors = self.constructors(class);
        let overloads: Vec<SyntaxNode<'p>> = constructors
            .iter()
            .copied()
            .filter(|c| c.field("body").is_none())
            .collect();
        let chosen = if !overloads.is_empty() && overloads.len() < constructors.len() {
            overloads
        } else {
            constructors
        };

        if !chosen.is_empty() {
            return chosen
                .into_iter()
                .map(|c| Signature {
                    declaration: Some(c),
                    type_parameters: type_parameters.clone(),
                    parameters: self.table.parameters(c).to_vec(),
                    return_type: instance.clone(),
                })
                .collect();
        }

        if depth < MAX_HERITAGE_DEPTH {
            if let Some(base) = self.base_class(class) {
                trace!(class = %instance, "constructor inherited from base class");
                return self
                    .construct_signatures_of(base, depth + 1)
                    .into_iter()
                    .map(|mut s| {
                        s.type_parameters = type_parameters.clone();
                        s.return_type = instance.clone();
                        s
                    })
                    .collect();
            }
        }

        vec![Signature {
            declaration: None,
            type_parameters,
            parameters: Vec::new(),
            return_type: instance,
        }]
    }

    /// Declaration of the class named in `extends`, if it resolves
    fn base_class(&self, class: SyntaxNode<'p>) -> Option<SyntaxNode<'p>> {
        let heritage = class
            .named_children()
            .into_iter()
            .find(|c| c.kind() == "class_heritage")?;

        let base = match heritage
            .named_children()
            .into_iter()
            .find(|c| c.kind() == "extends_clause")
        {
            Some(clause) => clause.field("value")?,
            // JavaScript puts the expression directly under the heritage
            None => heritage.named_children().into_iter().next()?,
        };
        if base.kind() != "identifier" {
            return None;
        }

        let symbol = self.table.resolve(self.text(base), class)?;
        let data = self.table.symbol(symbol);
        match data.kind {
            SymbolKind::Class => data.value_declaration,
            _ => None,
        }
    }

    /// `Name` or `Name<T, U>`
    fn instance_type(&self, class: SyntaxNode<'p>) -> String {
        let name = class
            .field("name")
            .map(|n| self.text(n))
            .unwrap_or("default");

        let parameters: Vec<&str> = class
            .field("type_parameters")
            .map(|tp| {
                tp.named_children()
                    .into_iter()
                    .filter(|p| p.kind() == "type_parameter")
                    .filter_map(|p| p.field("name"))
                    .map(|n| self.text(n))
                    .collect()
            })
            .unwrap_or_default();

        if parameters.is_empty() {
            name.to_string()
        } else {
            format!("{}<{}>", name, parameters.join(", "))
        }
    }

    fn variable_type(&self, declarator: SyntaxNode<'p>) -> Type<'p> {
        if let Some(annotation) = declarator.field("type") {
            return Type::Named(annotation_text(self.text(annotation)));
        }
        match declarator.field("value") {
            Some(value) if is_function_like(value.kind()) => {
                Type::Function(vec![self.signature_of(value)])
            }
            Some(value) => Type::Named(self.expression_type(value)),
            None => Type::any(),
        }
    }

    /// Declared type of a parameter, with `| undefined` for `x?: T` under
    /// strict null checks
    fn parameter_type(&self, param: SyntaxNode<'p>, name: &str) -> String {
        let parts = ParamParts::of(param);

        let base = if let Some(annotation) = parts.annotation {
            annotation_text(self.text(annotation))
        } else if let Some(ty) = self.jsdoc_param_type(param, name) {
            ty
        } else if parts.rest {
            "any[]".to_string()
        } else if let Some(initializer) = parts.initializer {
            self.expression_type(initializer)
        } else {
            "any".to_string()
        };

        if parts.question
            && self.strict_null_checks()
            && !matches!(base.as_str(), "any" | "unknown")
            && !base.split(" | ").any(|t| t == "undefined")
        {
            format!("{} | undefined", base)
        } else {
            base
        }
    }

    fn jsdoc_param_type(&self, param: SyntaxNode<'p>, name: &str) -> Option<String> {
        if !self.is_javascript(param) {
            return None;
        }
        self.param_tags(param, name)
            .into_iter()
            .find_map(|t| t.type_expression)
    }

    /// `name?: T`, `...rest: T[]` as shown inside a signature
    fn parameter_display(&self, symbol: SymbolId) -> String {
        let data = self.table.symbol(symbol);
        let Some(declaration) = data.value_declaration else {
            return format!("{}: any", data.name);
        };
        let parts = ParamParts::of(declaration);
        format!(
            "{}{}{}: {}",
            if parts.rest { "..." } else { "" },
            data.name,
            if parts.question || parts.initializer.is_some() {
                "?"
            } else {
                ""
            },
            self.parameter_type(declaration, &data.name)
        )
    }

    fn signature_to_string(&self, signature: &Signature<'p>, arrow: bool) -> String {
        let parameters: Vec<String> = signature
            .parameters
            .iter()
            .map(|p| self.parameter_display(*p))
            .collect();
        format!(
            "{}({}){}{}",
            signature.type_parameters.as_deref().unwrap_or(""),
            parameters.join(", "),
            if arrow { " => " } else { ": " },
            signature.return_type
        )
    }

    pub fn render_type(&self, ty: &Type<'p>) -> String {
        match ty {
            Type::Function(signatures) => match signatures.as_slice() {
                [] => "{}".to_string(),
                [only] => self.signature_to_string(only, true),
                many => {
                    let members: Vec<String> = many
                        .iter()
                        .map(|s| format!("{}; ", self.signature_to_string(s, false)))
                        .collect();
                    format!("{{ {}}}", members.concat())
                }
            },
            Type::Class { name, .. } => format!("typeof {}", name),
            Type::Named(text) => text.clone(),
        }
    }

    fn documentation_parts(&self, comments: &[String]) -> Vec<DisplayPart> {
        let mut parts = Vec::new();
        for (i, comment) in comments.iter().enumerate() {
            if i > 0 {
                parts.push(DisplayPart::line_break());
            }
            parts.extend(comment_parts(comment));
        }
        parts
    }
}

/// The pieces of a parameter declaration that affect its type
#[derive(Debug, Default)]
struct ParamParts<'p> {
    annotation: Option<SyntaxNode<'p>>,
    initializer: Option<SyntaxNode<'p>>,
    question: bool,
    rest: bool,
}

impl<'p> ParamParts<'p> {
    fn of(param: SyntaxNode<'p>) -> Self {
        match param.kind() {
            "required_parameter" | "optional_parameter" => Self {
                annotation: param.field("type"),
                initializer: param.field("value"),
                question: param.kind() == "optional_parameter",
                rest: param
                    .field("pattern")
                    .map(|p| p.kind() == "rest_pattern")
                    .unwrap_or(false),
            },
            "assignment_pattern" => Self {
                initializer: param.field("right"),
                ..Default::default()
            },
            "rest_pattern" => Self {
                rest: true,
                ..Default::default()
            },
            _ => Self::default(),
        }
    }
}

impl<'p> SyntaxView for Checker<'p> {
    type Node = SyntaxNode<'p>;

    fn kind(&self, node: SyntaxNode<'p>) -> NodeKind<SyntaxNode<'p>> {
        classify(node)
    }

    fn name(&self, node: SyntaxNode<'p>) -> Option<SyntaxNode<'p>> {
        node.field("name")
    }
}

impl<'p> TypeChecker for Checker<'p> {
    type Symbol = SymbolId;
    type Type = Type<'p>;
    type Signature = Signature<'p>;

    fn source_files(&self) -> Vec<SourceUnit<SyntaxNode<'p>>> {
        self.program
            .source_files()
            .iter()
            .map(|f| SourceUnit {
                file_name: f.file_name.clone(),
                is_declaration_file: f.is_declaration_file,
                statements: f.statements(),
            })
            .collect()
    }

    fn node_symbol(&self, node: SyntaxNode<'p>) -> Option<SymbolId> {
        self.table.node_symbol(node)
    }

    /// Declaration names answer with their declaration's symbol; any other
    /// identifier is looked up in the scopes enclosing it
    fn symbol_at_location(&self, location: SyntaxNode<'p>) -> Option<SymbolId> {
        if let Some(parent) = location.parent() {
            if parent.field("name") == Some(location) {
                if let Some(symbol) = self.table.node_symbol(parent) {
                    return Some(symbol);
                }
            }
        }
        if !matches!(location.kind(), "identifier" | "type_identifier") {
            return None;
        }
        self.table.resolve(self.text(location), location)
    }

    fn symbol_name(&self, symbol: SymbolId) -> String {
        self.table.symbol(symbol).name.clone()
    }

    fn value_declaration(&self, symbol: SymbolId) -> Option<SyntaxNode<'p>> {
        self.table.symbol(symbol).value_declaration
    }

    fn type_of_symbol_at_location(&self, symbol: SymbolId, _location: SyntaxNode<'p>) -> Type<'p> {
        self.type_of_symbol(symbol)
    }

    fn type_to_string(&self, ty: &Type<'p>) -> String {
        self.render_type(ty)
    }

    fn call_signatures(&self, ty: &Type<'p>) -> Vec<Signature<'p>> {
        match ty {
            Type::Function(signatures) => signatures.clone(),
            _ => Vec::new(),
        }
    }

    fn construct_signatures(&self, ty: &Type<'p>) -> Vec<Signature<'p>> {
        match ty {
            Type::Class { construct, .. } => construct.clone(),
            _ => Vec::new(),
        }
    }

    fn signature_parameters(&self, signature: &Signature<'p>) -> Vec<SymbolId> {
        signature.parameters.clone()
    }

    fn signature_return_type(&self, signature: &Signature<'p>) -> Type<'p> {
        Type::Named(signature.return_type.clone())
    }

    /// Distinct comments of all declarations; `@param` text for parameters
    fn symbol_documentation(&self, symbol: SymbolId) -> Vec<DisplayPart> {
        let data = self.table.symbol(symbol);

        let mut comments: Vec<String> = Vec::new();
        if data.kind == SymbolKind::Parameter {
            for declaration in &data.declarations {
                for tag in self.param_tags(*declaration, &data.name) {
                    if !tag.comment.is_empty() && !comments.contains(&tag.comment) {
                        comments.push(tag.comment);
                    }
                }
            }
        } else {
            for declaration in &data.declarations {
                let comment = self.declaration_comment(*declaration);
                if !comment.is_empty() && !comments.contains(&comment) {
                    comments.push(comment);
                }
            }
        }

        self.documentation_parts(&comments)
    }

    fn signature_documentation(&self, signature: &Signature<'p>) -> Vec<DisplayPart> {
        match signature.declaration {
            Some(declaration) => {
                let comment = self.declaration_comment(declaration);
                if comment.is_empty() {
                    Vec::new()
                } else {
                    comment_parts(&comment)
                }
            }
            None => Vec::new(),
        }
    }
}
