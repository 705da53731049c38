//! # logframe
//!
//! Schema-validated extraction of log channels into time-indexed Arrow
//! frames.
//!
//! This crate is the supported public entry point and provides a small,
//! stable surface over `logframe-core`: give [`extract`] an open log
//! handle, a channel name, and a list of dotted field paths, and it
//! returns one frame with a column per path and a row per message,
//! indexed by the per-message timestamps. Every path is validated against
//! the channel's message schema before any data is read.
//!
//! ## Example
//!
//! ```rust,ignore
//! use logframe::prelude::*;
//!
//! let frame = extract(&reader, "/gps", &["status.status", "latitude"])?;
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

pub use logframe_core::{
    compile_accessors, extract, extract_with, Accessor, ArrowFrameBuilder, BuildError, FieldKind,
    FieldSpec, FrameBuilder, FrameError, FrameResult, LogReader, Message, MessageSchema,
    RawEntries, RawEntry, ReaderError, TypeStore, Value, TIME_COLUMN,
};

/// In-memory log reader for tests and examples.
pub mod test_utils {
    pub use logframe_core::test_utils::{MemLog, MemTypeStore};
}
