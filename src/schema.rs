//! Documentation record data structures

use serde::{Deserialize, Serialize};

/// Structured documentation record for one documented entity.
///
/// The same shape describes top-level entities and their parameters; a
/// parameter entry only carries `name`, `documentation` and `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Display name of the source file the entity was found in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    /// Rendered type of the symbol at its value declaration
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Call signatures for functions, construct signatures for classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructors: Option<Vec<SignatureEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<DocEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    /// Which classifier produced the record; not part of the JSON shape
    #[serde(skip)]
    pub kind: Option<EntryKind>,
}

/// Entity kind of a top-level record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `constructors` holds call signatures
    Function,
    /// `constructors` holds construct signatures
    Class,
}

/// A serialized signature parameter
pub type ParamEntry = DocEntry;

/// One call or construct signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureEntry {
    /// Parameters in declaration order
    pub parameters: Vec<ParamEntry>,
    pub return_type: String,
    /// The signature's own comment, independent of the owning symbol's
    pub documentation: String,
}

impl DocEntry {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Signatures listed under `constructors`, empty when absent
    pub fn signatures(&self) -> &[SignatureEntry] {
        self.constructors.as_deref().unwrap_or(&[])
    }
}
