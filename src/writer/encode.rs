//! Protobuf encoding of log batches.
//!
//! ```protobuf
//! message LogGroup {
//!     required string Topic = 1;
//!     required string Source = 2;
//!     repeated Log Logs = 3;
//! }
//! message Log {
//!     required uint32 Time = 1; // UNIX seconds
//!     repeated Content Contents = 2;
//! }
//! message Content {
//!     required string Key = 1;
//!     required string Value = 2;
//! }
//! ```

use prost::Message as _;

use crate::message::Message;

#[derive(Clone, PartialEq, prost::Message)]
pub struct LogGroup {
    #[prost(string, required, tag = "1")]
    pub topic: String,
    #[prost(string, required, tag = "2")]
    pub source: String,
    #[prost(message, repeated, tag = "3")]
    pub logs: Vec<Log>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Log {
    /// UNIX time stamp in whole seconds.
    #[prost(uint32, required, tag = "1")]
    pub time: u32,
    #[prost(message, repeated, tag = "2")]
    pub contents: Vec<LogContent>,
}

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Message)]
pub struct LogContent {
    #[prost(string, required, tag = "1")]
    pub key: String,
    #[prost(string, required, tag = "2")]
    pub value: String,
}

impl From<&Message> for Log {
    fn from(message: &Message) -> Self {
        Self {
            time: message.unix_seconds(),
            contents: message
                .contents
                .iter()
                .map(|(key, value)| LogContent {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

/// Serialise `messages` into a protobuf log group.
///
/// Keys and values are copied verbatim; content order within each log follows
/// map iteration order and is not stable between calls.
///
/// # Errors
///
/// Returns [`prost::EncodeError`] if the buffer cannot hold the encoded group.
pub fn encode(
    topic: &str,
    source: &str,
    messages: &[Message],
) -> Result<Vec<u8>, prost::EncodeError> {
    let group = LogGroup {
        topic: topic.to_owned(),
        source: source.to_owned(),
        logs: messages.iter().map(Log::from).collect(),
    };
    let mut buf = Vec::with_capacity(group.encoded_len());
    group.encode(&mut buf)?;
    Ok(buf)
}
