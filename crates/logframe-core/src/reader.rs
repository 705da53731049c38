//! The log-reader seam.
//!
//! `logframe` never opens, parses, or closes logs itself; it drives a
//! caller-supplied [`LogReader`] that enumerates channels, yields raw
//! entries in the log's own order, and decodes payloads into [`Message`]
//! instances. The reader owns the open/closed lifecycle; extraction only
//! observes it through [`LogReader::is_open`].

use std::error::Error;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::schema::TypeStore;
use crate::value::Message;

/// Error reported by a log-reading collaborator.
///
/// Concrete wrapper over the collaborator's own error type so reader
/// failures can flow through [`crate::FrameError`] without making every
/// signature generic.
#[derive(Debug)]
pub struct ReaderError(Box<dyn Error + Send + Sync>);

impl ReaderError {
    /// Wrap an arbitrary collaborator error.
    pub fn new(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self(source.into())
    }

    /// Build a reader error from a bare message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self(message.to_string().into())
    }
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for ReaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

/// One raw, undecoded entry read from a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Nanoseconds since the Unix epoch, as recorded by the log.
    pub timestamp: i64,
    /// The entry's serialized payload.
    pub payload: Bytes,
}

impl RawEntry {
    /// The entry timestamp as an absolute UTC instant.
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.timestamp)
    }
}

/// Iterator of raw entries yielded by [`LogReader::read`].
pub type RawEntries<'a> = Box<dyn Iterator<Item = Result<RawEntry, ReaderError>> + 'a>;

/// Capability set of an open log handle.
///
/// Entry ordering and filtering to a single channel are the reader's
/// responsibility; extraction consumes the stream exactly once, in the
/// order given, and trusts it (typically timestamp order).
pub trait LogReader {
    /// Whether the log is currently in the opened state.
    fn is_open(&self) -> bool;

    /// The set of channel names known to the log.
    fn channel_names(&self) -> Vec<String>;

    /// The message type name the channel declares, if the channel exists
    /// and carries one.
    fn message_type(&self, channel: &str) -> Option<String>;

    /// Stream the channel's raw entries in the log's own order.
    fn read(&self, channel: &str) -> RawEntries<'_>;

    /// Decode a raw payload into a [`Message`] of the given type.
    fn decode(&self, payload: &[u8], type_name: &str) -> Result<Message, ReaderError>;

    /// The schema registry backing this log.
    fn type_store(&self) -> &dyn TypeStore;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn raw_entry_timestamp_is_nanoseconds_since_epoch() {
        let entry = RawEntry {
            timestamp: 1_500_000_000,
            payload: Bytes::new(),
        };
        let expected = Utc.timestamp_opt(1, 500_000_000).single().unwrap();
        assert_eq!(entry.timestamp_utc(), expected);
    }

    #[test]
    fn reader_error_preserves_display_and_source() {
        let io = std::io::Error::other("truncated chunk");
        let err = ReaderError::new(io);
        assert_eq!(err.to_string(), "truncated chunk");

        let bare = ReaderError::msg("no index record");
        assert_eq!(bare.to_string(), "no index record");
    }
}
