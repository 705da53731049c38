//! Message schema model and the type-registry seam.
//!
//! A [`MessageSchema`] describes one message type: its name and ordered
//! field list. Nested fields reference other schemas *by type name* only;
//! the [`TypeStore`] registry owns every node and resolves references at
//! traversal time. Keeping references name-based means a cyclic type
//! universe never creates cyclic ownership, and any single path walk stays
//! finite because it is bounded by the path's segment count.

use serde::{Deserialize, Serialize};

/// Registry capability: resolve a message type name to its schema.
///
/// The store owns and caches schema nodes for the lifetime of the open log;
/// extraction only performs read-only lookups against it.
pub trait TypeStore {
    /// Look up the schema for `type_name`, if the type is known.
    fn schema_for(&self, type_name: &str) -> Option<&MessageSchema>;
}

/// Kind of one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Primitive leaf value (string, boolean, integer, or float).
    Leaf,
    /// Nested message, resolvable through the [`TypeStore`] by name.
    Message {
        /// Type name of the nested message schema.
        type_name: String,
    },
}

/// One field of a message schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as declared by the message type.
    pub name: String,
    /// Whether the field is a leaf or a nested message.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// A primitive leaf field.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Leaf,
        }
    }

    /// A nested-message field referencing `type_name`.
    pub fn message(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Message {
                type_name: type_name.into(),
            },
        }
    }
}

/// Schema node describing one message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl MessageSchema {
    /// Build a schema node from its type name and ordered field list.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The schema's type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the ordered field list.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}
