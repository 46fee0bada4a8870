//! Conversion of structured log events into [`Message`] values.
//!
//! Upstream logging adapters describe an event with typed fields. Each
//! [`FieldValue`] variant has a fixed rendering rule, so the resulting
//! [`Message`] only carries strings.

use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;

use crate::level::Level;
use crate::message::Message;

/// Typed value attached to a log event field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Rendered verbatim.
    Str(String),
    /// Rendered in decimal.
    Int(i64),
    /// Rendered in decimal.
    UInt(u64),
    /// Rendered with six fractional digits, e.g. `2.000000`.
    Float(f64),
    /// Rendered as `true` or `false`.
    Bool(bool),
    /// Rendered as the error's message.
    Error(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Error(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v:.6}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

macro_rules! field_value_from {
    ($variant:ident, $target:ty, $($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

field_value_from!(Int, i64, i8, i16, i32, i64);
field_value_from!(UInt, u64, u8, u16, u32, u64);
field_value_from!(Float, f64, f32, f64);
field_value_from!(Bool, bool, bool);

impl From<&(dyn std::error::Error + 'static)> for FieldValue {
    fn from(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Error(err.to_string())
    }
}

/// A structured event produced by an upstream logging framework.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEvent {
    pub time: SystemTime,
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, FieldValue)>,
}

impl LogEvent {
    /// Event stamped with the current time and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: SystemTime::now(),
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attach a field, returning the event for chaining.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

fn level_name(level: Level) -> String {
    level.as_str().to_owned()
}

/// Maps [`LogEvent`] values onto [`Message`] fields.
///
/// Keys are written in this order, later ones overwriting earlier ones: the
/// static `extra` fields, the event fields, the message, then the level.
#[derive(Clone, Debug)]
pub struct Converter {
    /// Key under which the event message is stored.
    pub message_key: String,
    /// Key under which the rendered level is stored.
    pub level_key: String,
    /// Rendering applied to the event level.
    pub level_format: fn(Level) -> String,
    /// Static fields added to every message.
    pub extra: BTreeMap<String, String>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new("message", "level")
    }
}

impl Converter {
    /// Converter storing the message and level under the given keys.
    pub fn new(message_key: impl Into<String>, level_key: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
            level_key: level_key.into(),
            level_format: level_name,
            extra: BTreeMap::new(),
        }
    }

    /// Replace the level rendering, e.g. to emit numeric severities.
    pub fn with_level_format(mut self, level_format: fn(Level) -> String) -> Self {
        self.level_format = level_format;
        self
    }

    /// Add a static field to every converted message.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Convert `event` into a message with the same timestamp.
    pub fn message(&self, event: &LogEvent) -> Message {
        let mut message = Message::new(event.time);
        let contents = &mut message.contents;
        contents.reserve(self.extra.len() + event.fields.len() + 2);
        for (k, v) in &self.extra {
            contents.insert(k.clone(), v.clone());
        }
        for (k, v) in &event.fields {
            contents.insert(k.clone(), v.to_string());
        }
        contents.insert(self.message_key.clone(), event.message.clone());
        contents.insert(self.level_key.clone(), (self.level_format)(event.level));
        message
    }
}
