//! In-memory log reader for tests and examples.
//!
//! [`MemLog`] implements [`LogReader`] over channels held in memory, with
//! payloads stored as JSON-encoded [`Message`] values so the raw-bytes and
//! decode contracts are exercised for real. Logs start closed, matching
//! the lifecycle of an on-disk log handle.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::reader::{LogReader, RawEntries, RawEntry, ReaderError};
use crate::schema::{MessageSchema, TypeStore};
use crate::value::Message;

/// Registry over a fixed set of schemas, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct MemTypeStore {
    schemas: BTreeMap<String, MessageSchema>,
}

impl MemTypeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its own type name.
    pub fn insert(&mut self, schema: MessageSchema) {
        self.schemas.insert(schema.name().to_string(), schema);
    }
}

impl TypeStore for MemTypeStore {
    fn schema_for(&self, type_name: &str) -> Option<&MessageSchema> {
        self.schemas.get(type_name)
    }
}

#[derive(Debug)]
struct MemChannel {
    message_type: String,
    entries: Vec<(i64, Bytes)>,
}

/// In-memory [`LogReader`] implementation.
///
/// Channels are declared up front with [`MemLog::add_channel`] and filled
/// with [`MemLog::push`]; entries are yielded in insertion order, which
/// tests keep ascending by timestamp the way a real log would.
#[derive(Debug)]
pub struct MemLog {
    open: bool,
    store: MemTypeStore,
    channels: BTreeMap<String, MemChannel>,
}

impl MemLog {
    /// New, closed log over the given type store.
    pub fn new(store: MemTypeStore) -> Self {
        Self {
            open: false,
            store,
            channels: BTreeMap::new(),
        }
    }

    /// Declare a channel carrying the given message type.
    pub fn add_channel(&mut self, channel: impl Into<String>, message_type: impl Into<String>) {
        self.channels.insert(
            channel.into(),
            MemChannel {
                message_type: message_type.into(),
                entries: Vec::new(),
            },
        );
    }

    /// Append a message to a channel at the given nanosecond timestamp.
    ///
    /// # Panics
    ///
    /// Panics if the channel was not declared; tests construct their logs
    /// up front.
    pub fn push(&mut self, channel: &str, timestamp: i64, message: &Message) {
        let payload = serde_json::to_vec(message).expect("message encodes as JSON");
        self.push_raw(channel, timestamp, Bytes::from(payload));
    }

    /// Append an already-encoded payload, for exercising decode failures.
    ///
    /// # Panics
    ///
    /// Panics if the channel was not declared.
    pub fn push_raw(&mut self, channel: &str, timestamp: i64, payload: Bytes) {
        self.channels
            .get_mut(channel)
            .expect("channel declared before push")
            .entries
            .push((timestamp, payload));
    }

    /// Mark the log opened.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Mark the log closed.
    pub fn close(&mut self) {
        self.open = false;
    }
}

impl LogReader for MemLog {
    fn is_open(&self) -> bool {
        self.open
    }

    fn channel_names(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }

    fn message_type(&self, channel: &str) -> Option<String> {
        self.channels
            .get(channel)
            .map(|chan| chan.message_type.clone())
    }

    fn read(&self, channel: &str) -> RawEntries<'_> {
        match self.channels.get(channel) {
            Some(chan) => Box::new(chan.entries.iter().map(|(timestamp, payload)| {
                Ok(RawEntry {
                    timestamp: *timestamp,
                    payload: payload.clone(),
                })
            })),
            None => Box::new(std::iter::empty()),
        }
    }

    fn decode(&self, payload: &[u8], _type_name: &str) -> Result<Message, ReaderError> {
        serde_json::from_slice(payload).map_err(ReaderError::new)
    }

    fn type_store(&self) -> &dyn TypeStore {
        &self.store
    }
}
