//! Frame extraction: the row projector and the public entry points.
//!
//! [`extract`] converts the messages of one channel into a time-indexed
//! Arrow frame. All validation (reader state, channel membership, message
//! type resolution, full path resolution) happens before the first message
//! is decoded, so a malformed request never reads data and a failed
//! extraction never returns a partial frame. Once streaming starts the
//! projector is a pure map over the channel in the reader's own order: no
//! filtering, no reordering, no aggregation.

pub mod builder;

use arrow::array::RecordBatch;
use log::debug;
use snafu::prelude::*;

use crate::error::{
    BuildSnafu, DecodeSnafu, FrameResult, InstanceFieldMissingSnafu, MissingMessageTypeSnafu,
    NotOpenSnafu, ReadSnafu, UnknownChannelSnafu, UnknownMessageTypeSnafu,
};
use crate::frame::builder::{ArrowFrameBuilder, FrameBuilder};
use crate::path::compile_accessors;
use crate::reader::LogReader;
use crate::value::Value;

/// Extract `field_paths` from every message on `channel` into an Arrow
/// [`RecordBatch`].
///
/// Columns are named exactly as the given paths, in order, after a leading
/// time-index column; rows appear in the channel's read order with one row
/// per message. Convenience wrapper over [`extract_with`] and the default
/// [`ArrowFrameBuilder`].
pub fn extract<R, S>(reader: &R, channel: &str, field_paths: &[S]) -> FrameResult<RecordBatch>
where
    R: LogReader + ?Sized,
    S: AsRef<str>,
{
    extract_with(reader, channel, field_paths, &ArrowFrameBuilder::new())
}

/// Extract `field_paths` from every message on `channel`, materializing the
/// result through `builder`.
///
/// Validation order: reader open state, channel membership (before any
/// schema lookup), message type resolution, then full path resolution.
/// Only after all of these succeed is the first raw entry read.
pub fn extract_with<R, S, B>(
    reader: &R,
    channel: &str,
    field_paths: &[S],
    builder: &B,
) -> FrameResult<B::Frame>
where
    R: LogReader + ?Sized,
    S: AsRef<str>,
    B: FrameBuilder,
{
    ensure!(reader.is_open(), NotOpenSnafu);

    ensure!(
        reader.channel_names().iter().any(|name| name == channel),
        UnknownChannelSnafu { channel }
    );

    let type_name = reader
        .message_type(channel)
        .context(MissingMessageTypeSnafu { channel })?;

    let store = reader.type_store();
    let schema = store
        .schema_for(&type_name)
        .context(UnknownMessageTypeSnafu {
            type_name: type_name.as_str(),
        })?;

    let accessors = compile_accessors(store, schema, field_paths)?;

    let mut timestamps: Vec<i64> = Vec::new();
    let mut rows: Vec<Vec<Value>> = Vec::new();
    for entry in reader.read(channel) {
        let entry = entry.context(ReadSnafu { channel })?;
        let message = reader
            .decode(&entry.payload, &type_name)
            .context(DecodeSnafu { channel })?;

        let mut row = Vec::with_capacity(accessors.len());
        for (accessor, path) in accessors.iter().zip(field_paths) {
            let value = accessor
                .apply(&message)
                .with_context(|| InstanceFieldMissingSnafu {
                    field: path.as_ref(),
                    type_name: type_name.as_str(),
                })?
                .clone();
            row.push(value);
        }

        timestamps.push(entry.timestamp);
        rows.push(row);
    }

    debug!(
        "extracted {} rows x {} columns from channel {channel:?}",
        rows.len(),
        accessors.len(),
    );

    let columns: Vec<String> = field_paths
        .iter()
        .map(|path| path.as_ref().to_string())
        .collect();
    builder.build(&columns, rows, timestamps).context(BuildSnafu)
}
