//! Public writer type exported by the crate.

use chrono::Utc;
use log::{debug, warn};

use crate::error::WriteError;
use crate::handler::MessageWriter;
use crate::message::Message;

use super::compress::compress;
use super::config::WriterConfig;
use super::encode::encode;
use super::request::{RequestParts, SignedRequest, build_request};
use super::response::validate_response;
use super::transport::Transport;

/// Writer shipping message batches to a log-ingestion endpoint.
///
/// Each call encodes, compresses, signs and sends one request on the calling
/// thread. The writer holds no mutable state, so a single instance can be
/// shared between threads; no ordering is guaranteed between concurrent calls.
pub struct SlsWriter<T> {
    config: WriterConfig,
    transport: T,
}

impl<T: Transport> SlsWriter<T> {
    /// Construct the writer from a configuration and an HTTP transport.
    pub fn new(config: WriterConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Write `messages` as a single batch.
    ///
    /// An empty slice returns immediately without touching the network. The
    /// batch either succeeds as a whole or fails as a whole.
    ///
    /// # Errors
    ///
    /// Returns the first [`WriteError`] raised by any pipeline stage; nothing
    /// is retried.
    pub fn write_message(&self, messages: &[Message]) -> Result<(), WriteError> {
        if messages.is_empty() {
            return Ok(());
        }
        let request = self.prepare(messages)?;
        self.fire(request)
    }

    fn prepare(&self, messages: &[Message]) -> Result<SignedRequest, WriteError> {
        let raw = encode(&self.config.topic, &self.config.source, messages)?;
        let body = compress(&raw)?;
        debug!(
            "SlsWriter encoded {} records: {} bytes raw, {} bytes compressed",
            messages.len(),
            raw.len(),
            body.len()
        );
        let request = build_request(RequestParts {
            endpoint: &self.config.endpoint,
            access_key_id: &self.config.access_key_id,
            secret: &self.config.access_key_secret,
            raw_size: raw.len(),
            body,
            date: Utc::now(),
        })?;
        Ok(request)
    }

    fn fire(&self, request: SignedRequest) -> Result<(), WriteError> {
        let response = self.transport.execute(request)?;
        let status = response.status();
        debug!("SlsWriter received status {status}");
        validate_response(response).inspect_err(|err| {
            if let Some(vendor) = err.vendor() {
                warn!(
                    "SlsWriter batch rejected: status={} code={} request_id={}",
                    vendor.http_code, vendor.code, vendor.request_id
                );
            }
        })
    }
}

impl<T: Transport> MessageWriter for SlsWriter<T> {
    fn write_messages(&self, messages: &[Message]) -> Result<(), WriteError> {
        self.write_message(messages)
    }
}

impl<T> std::fmt::Debug for SlsWriter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlsWriter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
