//! Core engine for schema-validated field-path extraction from message
//! logs into time-indexed Arrow frames.
//!
//! `logframe-core` turns the messages of one log channel into a single
//! tabular frame: columns are caller-supplied dotted field paths, rows are
//! messages in the channel's own read order, and the row index is the
//! per-message timestamp. Two pieces do the work:
//!
//! - A path resolver that validates every dotted path against the
//!   channel's message schema *before any data is read* and compiles each
//!   one into a reusable accessor (`path` module).
//! - A row projector that drives the channel stream, decodes each raw
//!   entry, applies the accessors, and materializes the frame through a
//!   tabular backend (`frame` module).
//!
//! Everything else is a collaborator behind a trait seam: the log reader
//! and decoder ([`LogReader`]), the schema registry ([`TypeStore`]), and
//! the tabular backend ([`FrameBuilder`], with an Arrow implementation
//! included). The higher-level `logframe` facade crate is the supported
//! public entry point.
#![deny(missing_docs)]

pub mod error;
pub mod frame;
pub mod path;
pub mod reader;
pub mod schema;
pub mod test_utils;
pub mod value;

pub use error::{FrameError, FrameResult};
pub use frame::builder::{ArrowFrameBuilder, BuildError, FrameBuilder, TIME_COLUMN};
pub use frame::{extract, extract_with};
pub use path::{compile_accessors, Accessor};
pub use reader::{LogReader, RawEntries, RawEntry, ReaderError};
pub use schema::{FieldKind, FieldSpec, MessageSchema, TypeStore};
pub use value::{Message, Value};
