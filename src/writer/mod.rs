//! Write path for the log-ingestion service.
//!
//! [`SlsWriter`] turns a batch of [`Message`](crate::Message) values into one
//! signed HTTP request:
//!
//! 1. **Encode** the batch as a protobuf log group (topic, source, logs).
//! 2. **Compress** the bytes into a single LZ4 block, falling back to a
//!    literal-only block when the compressor yields nothing.
//! 3. **Sign** the protocol headers with HMAC-SHA1 and attach
//!    `Authorization: LOG <access key id>:<signature>`.
//! 4. **Send** through the caller's [`Transport`].
//! 5. **Validate** the response: statuses below 400 succeed, anything else is
//!    decoded into a [`VendorError`](crate::VendorError).
//!
//! # Failure semantics
//!
//! Every stage returns its own [`WriteError`](crate::WriteError) variant and
//! nothing is retried. Timeouts, pooling and TLS belong to the transport.

mod builder;
mod compress;
mod config;
mod encode;
mod handler;
mod headers;
mod request;
mod response;
mod sign;
mod transport;


pub use builder::{BuildError, SlsWriterBuilder};
pub use compress::{compress, compress_bound};
pub use config::{
    API_VERSION, COMPRESS_TYPE, CONTENT_TYPE, REQUEST_ID_HEADER, SIGNATURE_METHOD, WriterConfig,
};
pub use encode::{Log, LogContent, LogGroup, encode};
pub use handler::SlsWriter;
pub use headers::Headers;
pub use request::{SignedRequest, http_date};
pub use sign::signature;
pub use transport::{HttpResponse, Transport};
