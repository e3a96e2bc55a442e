//! Symbol, signature, function and class serializers.
//!
//! All four are pure reads of the checker; the only failure is a symbol that
//! has no value declaration to read its type from.

use crate::error::{DocgenError, Result};
use crate::schema::{DocEntry, EntryKind, SignatureEntry};

use super::facility::{display_parts_to_string, TypeChecker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignatureKind {
    Call,
    Construct,
}

fn value_declaration<C: TypeChecker>(checker: &C, symbol: C::Symbol) -> Result<C::Node> {
    checker
        .value_declaration(symbol)
        .ok_or_else(|| DocgenError::UnresolvedSymbol {
            name: checker.symbol_name(symbol),
        })
}

/// `{name, documentation, type}` for a symbol
pub fn serialize_symbol<C: TypeChecker>(checker: &C, symbol: C::Symbol) -> Result<DocEntry> {
    let declaration = value_declaration(checker, symbol)?;
    let ty = checker.type_of_symbol_at_location(symbol, declaration);

    Ok(DocEntry {
        name: Some(checker.symbol_name(symbol)),
        documentation: Some(display_parts_to_string(
            &checker.symbol_documentation(symbol),
        )),
        type_name: Some(checker.type_to_string(&ty)),
        ..Default::default()
    })
}

/// `{parameters, returnType, documentation}` for one signature
pub fn serialize_signature<C: TypeChecker>(
    checker: &C,
    signature: &C::Signature,
) -> Result<SignatureEntry> {
    let parameters = checker
        .signature_parameters(signature)
        .into_iter()
        .map(|p| serialize_symbol(checker, p))
        .collect::<Result<Vec<_>>>()?;

    Ok(SignatureEntry {
        parameters,
        return_type: checker.type_to_string(&checker.signature_return_type(signature)),
        documentation: display_parts_to_string(&checker.signature_documentation(signature)),
    })
}

/// Base record plus the call signatures of the symbol's type
pub fn serialize_function<C: TypeChecker>(checker: &C, symbol: C::Symbol) -> Result<DocEntry> {
    serialize_with_signatures(checker, symbol, SignatureKind::Call)
}

/// Base record plus the construct signatures of the symbol's type
pub fn serialize_class<C: TypeChecker>(checker: &C, symbol: C::Symbol) -> Result<DocEntry> {
    serialize_with_signatures(checker, symbol, SignatureKind::Construct)
}

fn serialize_with_signatures<C: TypeChecker>(
    checker: &C,
    symbol: C::Symbol,
    kind: SignatureKind,
) -> Result<DocEntry> {
    let mut details = serialize_symbol(checker, symbol)?;

    let declaration = value_declaration(checker, symbol)?;
    let ty = checker.type_of_symbol_at_location(symbol, declaration);
    let signatures = match kind {
        SignatureKind::Call => checker.call_signatures(&ty),
        SignatureKind::Construct => checker.construct_signatures(&ty),
    };

    let constructors = signatures
        .iter()
        .map(|s| serialize_signature(checker, s))
        .collect::<Result<Vec<_>>>()?;

    // Functions also expose their first call signature flattened
    if kind == SignatureKind::Call {
        if let Some(first) = constructors.first() {
            details.parameters = Some(first.parameters.clone());
            details.return_type = Some(first.return_type.clone());
        }
    }
    details.constructors = Some(constructors);
    details.kind = Some(match kind {
        SignatureKind::Call => EntryKind::Function,
        SignatureKind::Construct => EntryKind::Class,
    });

    Ok(details)
}
