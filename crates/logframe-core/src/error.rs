//! Error taxonomy for frame extraction.
//!
//! This module centralizes the [`FrameError`] enum used by the public API
//! and exposes context selectors (via `#[snafu(visibility(pub(crate)))]`)
//! so sibling modules can attach error context without re-exporting
//! everything at the crate root. Every validation check runs before the
//! first message is decoded, so a failed extraction never returns a
//! partial frame.

use snafu::prelude::*;

use crate::frame::builder::BuildError;
use crate::reader::ReaderError;

/// Result alias for extraction operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors from frame extraction.
///
/// Validation variants (`NotOpen` through `NotTraversable`) are raised
/// eagerly, before any entry is read; the remaining variants pass through
/// collaborator failures encountered while streaming or materializing.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FrameError {
    /// The log reader is not in the opened state.
    #[snafu(display("Log reader must be opened before messages can be extracted"))]
    NotOpen,

    /// The requested channel is not among the log's known channels.
    #[snafu(display("Requested unknown channel {channel:?}"))]
    UnknownChannel {
        /// The channel name that was requested.
        channel: String,
    },

    /// The channel exists but declares no message type.
    #[snafu(display("Channel {channel:?} declares no message type"))]
    MissingMessageType {
        /// The channel missing a declared message type.
        channel: String,
    },

    /// A message type name could not be resolved through the type store.
    #[snafu(display("Message type {type_name:?} is not known to the type store"))]
    UnknownMessageType {
        /// The type name that failed to resolve.
        type_name: String,
    },

    /// A path segment names a field absent from the schema node it was
    /// sought on.
    #[snafu(display("Field {field:?} does not exist on {schema:?}"))]
    FieldNotFound {
        /// The missing path segment.
        field: String,
        /// Name of the schema node the segment was sought on.
        schema: String,
    },

    /// A non-terminal path segment names a leaf field, which cannot be
    /// descended into further.
    #[snafu(display("Field {field:?} of {schema:?} is not a message"))]
    NotTraversable {
        /// The path segment naming a leaf field.
        field: String,
        /// Name of the schema node carrying the leaf field.
        schema: String,
    },

    /// The reader failed while streaming raw entries.
    #[snafu(display("Failed to read channel {channel:?}: {source}"))]
    Read {
        /// The channel being streamed when the reader failed.
        channel: String,
        /// Underlying reader error.
        source: ReaderError,
    },

    /// The decoder failed on a raw payload.
    #[snafu(display("Failed to decode message on channel {channel:?}: {source}"))]
    Decode {
        /// The channel whose payload failed to decode.
        channel: String,
        /// Underlying decoder error.
        source: ReaderError,
    },

    /// A decoded instance is missing a field its schema declares.
    ///
    /// Only reachable when the decoder produces instances that do not
    /// match the schema they were decoded against; the paths themselves
    /// were validated before streaming started.
    #[snafu(display("Decoded {type_name:?} instance has no field {field:?}"))]
    InstanceFieldMissing {
        /// The field path that could not be applied.
        field: String,
        /// The channel's declared message type.
        type_name: String,
    },

    /// The tabular backend failed while materializing the frame.
    #[snafu(display("Failed to build frame: {source}"))]
    Build {
        /// Underlying backend error.
        source: BuildError,
    },
}
