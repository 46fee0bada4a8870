//! Message representation consumed by the writer.
//!
//! A [`Message`] is the generic form every upstream log event is converted
//! into before it is shipped: a timestamp plus an unordered set of string
//! fields.

use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A single log entry ready for encoding.
///
/// Field order carries no meaning. The writer only ever borrows messages, so a
/// batch can be retried or inspected by the caller after a failed write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Time the event happened.
    pub time: SystemTime,
    /// Field name to rendered value.
    pub contents: HashMap<String, String>,
}

impl Message {
    /// Create an empty message stamped with `time`.
    pub fn new(time: SystemTime) -> Self {
        Self {
            time,
            contents: HashMap::new(),
        }
    }

    /// Create an empty message stamped with the current time.
    pub fn now() -> Self {
        Self::new(SystemTime::now())
    }

    /// Add or replace a field, returning the message for chaining.
    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.contents.insert(key.into(), value.into());
        self
    }

    /// Whole seconds since the Unix epoch as carried on the wire.
    ///
    /// Times before the epoch map to `0`; times beyond the 32-bit range
    /// saturate at `u32::MAX`.
    pub fn unix_seconds(&self) -> u32 {
        let secs = self
            .time
            .duration_since(UNIX_EPOCH)
            .map(|dur| dur.as_secs())
            .unwrap_or_default();
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fields @ {}", self.contents.len(), self.unix_seconds())
    }
}

impl<K, V> FromIterator<(K, V)> for Message
where
    K: Into<String>,
    V: Into<String>,
{
    /// Collect fields into a message stamped with the current time.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            time: SystemTime::now(),
            contents: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
