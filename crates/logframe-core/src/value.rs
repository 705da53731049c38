//! Value model for decoded messages.
//!
//! A [`Message`] is one decoded message instance: the concrete type name it
//! was decoded as, plus its field values in schema order. A [`Value`] is a
//! single field payload, either a primitive leaf or a nested [`Message`].
//! Accessors compiled by [`crate::path`] walk this model by field name only;
//! all schema checking happens before the first message is decoded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field value extracted from a decoded message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 string leaf.
    Str(String),
    /// Boolean leaf.
    Bool(bool),
    /// 64-bit signed integer leaf.
    Int(i64),
    /// 64-bit floating point leaf.
    Float(f64),
    /// An opaque nested message instance.
    Message(Message),
}

impl Value {
    /// Short name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Message(_) => "message",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Message(m) => write!(f, "{m}"),
        }
    }
}

/// One decoded message instance.
///
/// Field order is the order the decoder produced, which mirrors the schema's
/// declared order. Lookup is by name; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Message {
    /// Build a message instance from its type name and ordered field values.
    pub fn new(type_name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// The concrete type name this instance was decoded as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Borrow the ordered field values.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
