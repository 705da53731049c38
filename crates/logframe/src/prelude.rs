//! Wrapper prelude.
//!
//! The `logframe` crate is the supported public entry point. Downstream
//! code should prefer importing from this prelude instead of depending on
//! internal core module paths.

pub use crate::{
    extract, extract_with, ArrowFrameBuilder, FieldKind, FieldSpec, FrameBuilder, FrameError,
    FrameResult, LogReader, Message, MessageSchema, RawEntry, ReaderError, TypeStore, Value,
};
