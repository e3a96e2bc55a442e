//! Symbol binding: scopes, merged declarations and parameter symbols.
//!
//! Script files share the global scope; files with module syntax get their
//! own scope under it, and every namespace body opens a child scope.
//! Declarations of one name in one scope merge into a single symbol.

use std::collections::HashMap;

use tracing::trace;

use crate::program::Program;
use crate::syntax::{container_statements, is_function_like, unwrap_statement, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Kind of a symbol's value declaration, or of its first declaration for
/// type-only symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Class,
    Variable,
    Parameter,
    Namespace,
    Enum,
    Interface,
    TypeAlias,
}

impl SymbolKind {
    pub fn is_value(&self) -> bool {
        !matches!(self, Self::Interface | Self::TypeAlias)
    }
}

#[derive(Debug, Clone)]
pub struct SymbolData<'p> {
    pub name: String,
    pub kind: SymbolKind,
    pub declarations: Vec<SyntaxNode<'p>>,
    pub value_declaration: Option<SyntaxNode<'p>>,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    names: HashMap<String, SymbolId>,
}

/// Everything the binder learned about a program
#[derive(Debug, Default)]
pub struct SymbolTable<'p> {
    symbols: Vec<SymbolData<'p>>,
    scopes: Vec<Scope>,
    node_symbols: HashMap<SyntaxNode<'p>, SymbolId>,
    /// Program roots and namespace bodies, keyed to the scope they open
    container_scopes: HashMap<SyntaxNode<'p>, ScopeId>,
    /// Function-like node to its parameter symbols, in order
    parameters: HashMap<SyntaxNode<'p>, Vec<SymbolId>>,
}

impl<'p> SymbolTable<'p> {
    pub fn symbol(&self, id: SymbolId) -> &SymbolData<'p> {
        &self.symbols[id.0 as usize]
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn node_symbol(&self, node: SyntaxNode<'p>) -> Option<SymbolId> {
        self.node_symbols.get(&node).copied()
    }

    pub fn parameters(&self, function: SyntaxNode<'p>) -> &[SymbolId] {
        self.parameters
            .get(&function)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Innermost scope containing `node`
    pub fn enclosing_scope(&self, node: SyntaxNode<'p>) -> Option<ScopeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(scope) = self.container_scopes.get(&n) {
                return Some(*scope);
            }
            current = n.parent();
        }
        None
    }

    /// Look `name` up from `scope` outwards
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0 as usize];
            if let Some(symbol) = scope.names.get(name) {
                return Some(*symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolve `name` as written at `location`
    pub fn resolve(&self, name: &str, location: SyntaxNode<'p>) -> Option<SymbolId> {
        self.enclosing_scope(location)
            .and_then(|scope| self.lookup(scope, name))
    }
}

/// Bind every file of the program
pub fn bind_program(program: &Program) -> SymbolTable<'_> {
    let mut binder = Binder {
        program,
        table: SymbolTable::default(),
    };
    let global = binder.new_scope(None);

    for file in program.source_files() {
        let root = file.root();
        let scope = if file.is_external_module() {
            binder.new_scope(Some(global))
        } else {
            global
        };
        binder.table.container_scopes.insert(root, scope);
        for statement in container_statements(root) {
            binder.bind_statement(statement, scope);
        }
        binder.bind_parameters_in(root);
    }

    trace!(
        symbols = binder.table.symbols.len(),
        scopes = binder.table.scopes.len(),
        "program bound"
    );
    binder.table
}

struct Binder<'p> {
    program: &'p Program,
    table: SymbolTable<'p>,
}

impl<'p> Binder<'p> {
    fn text(&self, node: SyntaxNode<'p>) -> &'p str {
        node.text(&self.program.file(node.file).source)
    }

    fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.table.scopes.push(Scope {
            parent,
            names: HashMap::new(),
        });
        ScopeId(self.table.scopes.len() as u32 - 1)
    }

    fn new_symbol(&mut self, name: &str, kind: SymbolKind, declaration: SyntaxNode<'p>) -> SymbolId {
        self.table.symbols.push(SymbolData {
            name: name.to_string(),
            kind,
            declarations: vec![declaration],
            value_declaration: kind.is_value().then_some(declaration),
        });
        let id = SymbolId(self.table.symbols.len() as u32 - 1);
        self.table.node_symbols.insert(declaration, id);
        id
    }

    /// Declare `name` in `scope`, merging with an existing symbol
    fn declare(&mut self, scope: ScopeId, name: &str, kind: SymbolKind, declaration: SyntaxNode<'p>) {
        let existing = self.table.scopes[scope.0 as usize].names.get(name).copied();
        match existing {
            Some(id) => {
                let symbol = &mut self.table.symbols[id.0 as usize];
                symbol.declarations.push(declaration);
                if symbol.value_declaration.is_none() && kind.is_value() {
                    symbol.value_declaration = Some(declaration);
                    symbol.kind = kind;
                }
                self.table.node_symbols.insert(declaration, id);
            }
            None => {
                let id = self.new_symbol(name, kind, declaration);
                self.table.scopes[scope.0 as usize]
                    .names
                    .insert(name.to_string(), id);
            }
        }
    }

    fn declare_named(&mut self, scope: ScopeId, kind: SymbolKind, declaration: SyntaxNode<'p>) {
        if let Some(name) = declaration.field("name") {
            let name = self.text(name);
            self.declare(scope, name, kind, declaration);
        }
    }

    fn bind_statement(&mut self, statement: SyntaxNode<'p>, scope: ScopeId) {
        match statement.kind() {
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                self.declare_named(scope, SymbolKind::Function, statement);
            }
            "class_declaration" | "abstract_class_declaration" => {
                self.declare_named(scope, SymbolKind::Class, statement);
            }
            "lexical_declaration" | "variable_declaration" => {
                for declarator in statement.named_children() {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    if let Some(name) = declarator.field("name").filter(|n| n.kind() == "identifier") {
                        let name = self.text(name);
                        self.declare(scope, name, SymbolKind::Variable, declarator);
                    }
                    if let Some(value) = declarator.field("value") {
                        self.bind_expression(value);
                    }
                }
            }
            "internal_module" | "module" => self.bind_namespace(statement, scope),
            "interface_declaration" => self.declare_named(scope, SymbolKind::Interface, statement),
            "type_alias_declaration" => {
                self.declare_named(scope, SymbolKind::TypeAlias, statement);
                if let Some(value) = statement.field("value") {
                    self.bind_expression(value);
                }
            }
            "enum_declaration" => self.declare_named(scope, SymbolKind::Enum, statement),
            "ambient_declaration" => {
                for inner in statement.named_children() {
                    self.bind_statement(inner.with(unwrap_statement(inner.node)), scope);
                }
            }
            _ => {}
        }
    }

    fn bind_namespace(&mut self, namespace: SyntaxNode<'p>, scope: ScopeId) {
        if let Some(name) = namespace.field("name") {
            match name.kind() {
                "identifier" => {
                    let name = self.text(name);
                    self.declare(scope, name, SymbolKind::Namespace, namespace);
                }
                // `namespace A.B {}` declares `A`
                "nested_identifier" => {
                    let text = self.text(name);
                    let first = text.split('.').next().unwrap_or(text).trim();
                    self.declare(scope, first, SymbolKind::Namespace, namespace);
                }
                _ => {}
            }
        }

        if let Some(body) = namespace.field("body") {
            let inner = self.new_scope(Some(scope));
            self.table.container_scopes.insert(body, inner);
            for statement in container_statements(body) {
                self.bind_statement(statement, inner);
            }
        }
    }

    /// Function and arrow expressions get an anonymous symbol of their own
    fn bind_expression(&mut self, expression: SyntaxNode<'p>) {
        match expression.kind() {
            "arrow_function" | "function_expression" | "function" | "generator_function" => {
                let name = expression
                    .field("name")
                    .map(|n| self.text(n))
                    .unwrap_or("__function");
                self.new_symbol(name, SymbolKind::Function, expression);
            }
            "parenthesized_expression" => {
                if let Some(inner) = expression.named_children().into_iter().next() {
                    self.bind_expression(inner);
                }
            }
            _ => {}
        }
    }

    /// Parameter symbols for every function-like node of a file
    fn bind_parameters_in(&mut self, root: SyntaxNode<'p>) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if is_function_like(node.kind()) && !self.table.parameters.contains_key(&node) {
                self.bind_parameters(node);
            }
            stack.extend(node.named_children());
        }
    }

    fn bind_parameters(&mut self, function: SyntaxNode<'p>) {
        let params = match function.field("parameters") {
            Some(list) => list
                .named_children()
                .into_iter()
                .filter(|p| p.kind() != "comment")
                .collect(),
            // `x => x`
            None => function.field("parameter").into_iter().collect::<Vec<_>>(),
        };

        let mut symbols = Vec::with_capacity(params.len());
        for (index, param) in params.into_iter().enumerate() {
            let Some(name) = self.parameter_name(param, index) else {
                continue;
            };
            symbols.push(self.new_symbol(&name, SymbolKind::Parameter, param));
        }
        self.table.parameters.insert(function, symbols);
    }

    /// Declared name of a parameter; binding patterns are named by position
    /// and `this` parameters have none
    fn parameter_name(&self, param: SyntaxNode<'p>, index: usize) -> Option<String> {
        let pattern = match param.kind() {
            "required_parameter" | "optional_parameter" => param.field("pattern")?,
            "assignment_pattern" => param.field("left")?,
            _ => param,
        };

        match pattern.kind() {
            "this" => None,
            "identifier" => Some(self.text(pattern).to_string()),
            "rest_pattern" => {
                let inner = pattern.named_children().into_iter().next()?;
                if inner.kind() == "identifier" {
                    Some(self.text(inner).to_string())
                } else {
                    Some(format!("__{}", index))
                }
            }
            "object_pattern" | "array_pattern" => Some(format!("__{}", index)),
            _ => None,
        }
    }
}
