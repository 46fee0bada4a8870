//! Write-path client for a remote log-ingestion service.
//!
//! Batches of [`Message`] values are encoded as protobuf, compressed into an
//! LZ4 block, signed with HMAC-SHA1 and posted through a caller-supplied
//! [`Transport`]. See [`writer`] for the request pipeline and [`converter`]
//! for turning typed log events into messages.

pub mod converter;
pub mod error;
pub mod handler;
pub mod level;
pub mod message;
pub mod secret;
pub mod writer;

pub use converter::{Converter, FieldValue, LogEvent};
pub use error::{
    BuildRequestError, SignError, TransportError, VendorError, VendorErrorKind, WriteError,
};
pub use handler::MessageWriter;
pub use level::Level;
pub use message::Message;
pub use secret::{SECRET_MASK, Secret};
pub use writer::{
    BuildError, Headers, HttpResponse, SignedRequest, SlsWriter, SlsWriterBuilder, Transport,
    WriterConfig,
};
