//! In-memory facility for exercising the documentation core without parsing.

use std::collections::HashMap;

use super::facility::{DisplayPart, NodeKind, SourceUnit, SyntaxView, TypeChecker};

#[derive(Debug, Clone)]
pub struct FakeSignature {
    parameters: Vec<usize>,
    return_type: String,
    documentation: String,
}

#[derive(Debug, Clone)]
struct FakeSymbol {
    name: String,
    value_declaration: Option<usize>,
    type_text: String,
    documentation: String,
    call: Vec<FakeSignature>,
    construct: Vec<FakeSignature>,
}

#[derive(Debug, Clone)]
pub enum FakeType {
    Symbol(usize),
    Text(String),
}

/// Nodes and symbols are plain indices
#[derive(Debug, Default)]
pub struct FakeChecker {
    files: Vec<SourceUnit<usize>>,
    kinds: HashMap<usize, NodeKind<usize>>,
    names: HashMap<usize, usize>,
    attached: HashMap<usize, usize>,
    by_location: HashMap<usize, usize>,
    symbols: Vec<FakeSymbol>,
    next_node: usize,
}

impl FakeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, kind: NodeKind<usize>) -> usize {
        let id = self.next_node;
        self.next_node += 1;
        self.kinds.insert(id, kind);
        id
    }

    pub fn file(&mut self, name: &str, statements: Vec<usize>) {
        self.files.push(SourceUnit {
            file_name: name.to_string(),
            is_declaration_file: false,
            statements,
        });
    }

    pub fn declaration_file(&mut self, name: &str, statements: Vec<usize>) {
        self.files.push(SourceUnit {
            file_name: name.to_string(),
            is_declaration_file: true,
            statements,
        });
    }

    fn symbol(&mut self, name: &str, declaration: Option<usize>, type_text: &str, doc: &str) -> usize {
        self.symbols.push(FakeSymbol {
            name: name.to_string(),
            value_declaration: declaration,
            type_text: type_text.to_string(),
            documentation: doc.to_string(),
            call: Vec::new(),
            construct: Vec::new(),
        });
        self.symbols.len() - 1
    }

    pub fn function_symbol(&mut self, name: &str, type_text: &str, doc: &str) -> usize {
        let declaration = self.node(NodeKind::Other);
        self.symbol(name, Some(declaration), type_text, doc)
    }

    pub fn class_symbol(&mut self, name: &str, doc: &str) -> usize {
        let declaration = self.node(NodeKind::Other);
        self.symbol(name, Some(declaration), &format!("typeof {}", name), doc)
    }

    pub fn parameter_symbol(&mut self, name: &str, type_text: &str, doc: &str) -> usize {
        let declaration = self.node(NodeKind::Other);
        self.symbol(name, Some(declaration), type_text, doc)
    }

    pub fn type_only_symbol(&mut self, name: &str) -> usize {
        self.symbol(name, None, name, "")
    }

    fn signature(params: &[usize], return_type: &str, doc: &str) -> FakeSignature {
        FakeSignature {
            parameters: params.to_vec(),
            return_type: return_type.to_string(),
            documentation: doc.to_string(),
        }
    }

    pub fn add_call_signature(&mut self, symbol: usize, params: &[usize], ret: &str, doc: &str) {
        self.symbols[symbol].call.push(Self::signature(params, ret, doc));
    }

    pub fn add_construct_signature(&mut self, symbol: usize, params: &[usize], ret: &str, doc: &str) {
        self.symbols[symbol]
            .construct
            .push(Self::signature(params, ret, doc));
    }

    /// `function <name>() {}` with an attached symbol and one signature
    pub fn function_declaration(&mut self, name: &str) -> usize {
        let name_node = self.node(NodeKind::Other);
        let node = self.node(NodeKind::FunctionDeclaration {
            name: Some(name_node),
        });
        self.names.insert(node, name_node);
        let symbol = self.symbol(name, Some(node), "() => void", "");
        self.add_call_signature(symbol, &[], "void", "");
        self.attached.insert(node, symbol);
        node
    }

    /// A function declaration whose symbol is only reachable through its name
    pub fn function_resolved_by_name(&mut self, name: &str) -> usize {
        let node = self.function_declaration(name);
        if let Some(symbol) = self.attached.remove(&node) {
            let name_node = self.names[&node];
            self.by_location.insert(name_node, symbol);
        }
        node
    }

    /// An arrow function with the binder's anonymous symbol
    pub fn arrow_function(&mut self) -> usize {
        let node = self.node(NodeKind::FunctionExpression);
        let symbol = self.symbol("__function", Some(node), "() => void", "");
        self.add_call_signature(symbol, &[], "void", "");
        self.attached.insert(node, symbol);
        node
    }

    /// `class <name> {}`; the symbol resolves from the name identifier only
    pub fn class_declaration(&mut self, name: &str) -> usize {
        let name_node = self.node(NodeKind::Other);
        let node = self.node(NodeKind::ClassDeclaration {
            name: Some(name_node),
        });
        self.names.insert(node, name_node);
        let symbol = self.symbol(name, Some(node), &format!("typeof {}", name), "");
        self.add_construct_signature(symbol, &[], name, "");
        self.by_location.insert(name_node, symbol);
        node
    }

    /// A class whose name does not resolve; `attached` gives it a generic symbol
    pub fn unresolved_class(&mut self, name: &str, attached: bool) -> usize {
        let name_node = self.node(NodeKind::Other);
        let node = self.node(NodeKind::ClassDeclaration {
            name: Some(name_node),
        });
        self.names.insert(node, name_node);
        if attached {
            let symbol = self.symbol(name, Some(node), &format!("typeof {}", name), "");
            self.add_construct_signature(symbol, &[], name, "");
            self.attached.insert(node, symbol);
        }
        node
    }

    /// Attach a symbol that has no value declaration to a node
    pub fn attach_type_only_symbol(&mut self, node: usize, name: &str) {
        let symbol = self.type_only_symbol(name);
        self.attached.insert(node, symbol);
    }

    pub fn interface(&mut self) -> usize {
        self.node(NodeKind::Interface)
    }

    pub fn import(&mut self) -> usize {
        self.node(NodeKind::Import)
    }

    pub fn ambient(&mut self) -> usize {
        self.node(NodeKind::Ambient)
    }

    pub fn other(&mut self) -> usize {
        self.node(NodeKind::Other)
    }

    pub fn namespace(&mut self, body: Vec<usize>) -> usize {
        self.node(NodeKind::Module { body })
    }

    pub fn variable_statement(&mut self, initializers: Vec<Option<usize>>) -> usize {
        self.node(NodeKind::VariableStatement { initializers })
    }

    pub fn type_alias(&mut self, aliased: usize) -> usize {
        self.node(NodeKind::TypeAlias { aliased })
    }
}

impl SyntaxView for FakeChecker {
    type Node = usize;

    fn kind(&self, node: usize) -> NodeKind<usize> {
        self.kinds.get(&node).cloned().unwrap_or(NodeKind::Other)
    }

    fn name(&self, node: usize) -> Option<usize> {
        self.names.get(&node).copied()
    }
}

impl TypeChecker for FakeChecker {
    type Symbol = usize;
    type Type = FakeType;
    type Signature = FakeSignature;

    fn source_files(&self) -> Vec<SourceUnit<usize>> {
        self.files.clone()
    }

    fn node_symbol(&self, node: usize) -> Option<usize> {
        self.attached.get(&node).copied()
    }

    fn symbol_at_location(&self, location: usize) -> Option<usize> {
        self.by_location.get(&location).copied()
    }

    fn symbol_name(&self, symbol: usize) -> String {
        self.symbols[symbol].name.clone()
    }

    fn value_declaration(&self, symbol: usize) -> Option<usize> {
        self.symbols[symbol].value_declaration
    }

    fn type_of_symbol_at_location(&self, symbol: usize, _location: usize) -> FakeType {
        FakeType::Symbol(symbol)
    }

    fn type_to_string(&self, ty: &FakeType) -> String {
        match ty {
            FakeType::Symbol(s) => self.symbols[*s].type_text.clone(),
            FakeType::Text(t) => t.clone(),
        }
    }

    fn call_signatures(&self, ty: &FakeType) -> Vec<FakeSignature> {
        match ty {
            FakeType::Symbol(s) => self.symbols[*s].call.clone(),
            FakeType::Text(_) => Vec::new(),
        }
    }

    fn construct_signatures(&self, ty: &FakeType) -> Vec<FakeSignature> {
        match ty {
            FakeType::Symbol(s) => self.symbols[*s].construct.clone(),
            FakeType::Text(_) => Vec::new(),
        }
    }

    fn signature_parameters(&self, signature: &FakeSignature) -> Vec<usize> {
        signature.parameters.clone()
    }

    fn signature_return_type(&self, signature: &FakeSignature) -> FakeType {
        FakeType::Text(signature.return_type.clone())
    }

    fn symbol_documentation(&self, symbol: usize) -> Vec<DisplayPart> {
        let doc = &self.symbols[symbol].documentation;
        if doc.is_empty() {
            Vec::new()
        } else {
            vec![DisplayPart::text(doc.clone())]
        }
    }

    fn signature_documentation(&self, signature: &FakeSignature) -> Vec<DisplayPart> {
        if signature.documentation.is_empty() {
            Vec::new()
        } else {
            vec![DisplayPart::text(signature.documentation.clone())]
        }
    }
}
