//! Field-path resolution and compiled accessors.
//!
//! Paths use a dotted syntax (`a.b.c`) to traverse nested messages. Every
//! path is validated against the channel's schema before any message is
//! decoded, so a malformed request fails fast and deterministically instead
//! of partway through a large channel. Validation walks all segments but
//! the last through nested-message fields, resolving each nested type
//! through the [`TypeStore`]; the final segment only has to exist. It may
//! itself name a nested message, in which case the projected column holds
//! the opaque instance.

use snafu::prelude::*;

use crate::error::{
    FieldNotFoundSnafu, FrameResult, NotTraversableSnafu, UnknownMessageTypeSnafu,
};
use crate::schema::{FieldKind, MessageSchema, TypeStore};
use crate::value::{Message, Value};

/// A compiled projection from a decoded message to one field value.
///
/// The variant is selected once, by path length, when the path is
/// validated; applying an accessor does no schema work and no per-message
/// branching beyond the lookups themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Single field lookup by name on the input message.
    Direct(String),
    /// Ordered chain of lookups, each result feeding the next lookup.
    Chained(Vec<String>),
}

impl Accessor {
    /// Apply the accessor to a decoded message, returning the addressed
    /// value.
    ///
    /// Returns `None` only when the instance does not match the schema the
    /// path was validated against; validation already guaranteed the path
    /// itself.
    pub fn apply<'a>(&self, message: &'a Message) -> Option<&'a Value> {
        match self {
            Accessor::Direct(name) => message.field(name),
            Accessor::Chained(segments) => {
                let (last, init) = segments.split_last()?;
                let mut node = message;
                for segment in init {
                    match node.field(segment)? {
                        Value::Message(nested) => node = nested,
                        _ => return None,
                    }
                }
                node.field(last)
            }
        }
    }
}

/// Validate `paths` against `schema` and compile one accessor per path.
///
/// The output is ordered 1:1 with the input. Fails on the first invalid
/// path, before any message is read:
///
/// - [`FrameError::FieldNotFound`](crate::FrameError::FieldNotFound) when a
///   segment names a field absent from the node it is sought on;
/// - [`FrameError::NotTraversable`](crate::FrameError::NotTraversable) when
///   a non-terminal segment names a leaf field;
/// - [`FrameError::UnknownMessageType`](crate::FrameError::UnknownMessageType)
///   when a nested type reference does not resolve through `store`.
pub fn compile_accessors<S: AsRef<str>>(
    store: &dyn TypeStore,
    schema: &MessageSchema,
    paths: &[S],
) -> FrameResult<Vec<Accessor>> {
    let mut accessors = Vec::with_capacity(paths.len());
    for path in paths {
        accessors.push(compile_accessor(store, schema, path.as_ref())?);
    }
    Ok(accessors)
}

fn compile_accessor<'a>(
    store: &'a dyn TypeStore,
    schema: &'a MessageSchema,
    path: &str,
) -> FrameResult<Accessor> {
    let segments: Vec<&str> = path.split('.').collect();
    // split() yields at least one segment, even for an empty path string,
    // which then fails the final field lookup below.
    let (last, init) = match segments.split_last() {
        Some(parts) => parts,
        None => {
            return FieldNotFoundSnafu {
                field: path,
                schema: schema.name(),
            }
            .fail();
        }
    };

    let mut node = schema;
    for segment in init {
        let field = node.field(segment).context(FieldNotFoundSnafu {
            field: *segment,
            schema: node.name(),
        })?;

        node = match &field.kind {
            FieldKind::Message { type_name } => {
                store
                    .schema_for(type_name)
                    .context(UnknownMessageTypeSnafu {
                        type_name: type_name.as_str(),
                    })?
            }
            FieldKind::Leaf => {
                return NotTraversableSnafu {
                    field: *segment,
                    schema: node.name(),
                }
                .fail();
            }
        };
    }

    ensure!(
        node.field(last).is_some(),
        FieldNotFoundSnafu {
            field: *last,
            schema: node.name(),
        }
    );

    Ok(if segments.len() == 1 {
        Accessor::Direct((*last).to_string())
    } else {
        Accessor::Chained(segments.iter().map(|s| (*s).to_string()).collect())
    })
}
