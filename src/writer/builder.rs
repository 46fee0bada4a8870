//! Builder for [`SlsWriter`](super::SlsWriter).
//!
//! Collects the endpoint, log group labels, credentials and transport, then
//! validates them once in [`SlsWriterBuilder::build`].

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::secret::Secret;

use super::config::WriterConfig;
use super::handler::SlsWriter;
use super::transport::Transport;

/// Errors that may occur while building a writer.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required setting was never provided.
    #[error("missing required setting: {0}")]
    MissingField(&'static str),
    /// The endpoint is not a valid URL.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

macro_rules! string_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: impl Into<String>) -> Self {
            self.$field = Some(value.into());
            self
        }
    };
}

/// Builder for constructing [`SlsWriter`] instances.
pub struct SlsWriterBuilder<T> {
    endpoint: Option<String>,
    topic: Option<String>,
    source: Option<String>,
    access_key_id: Option<String>,
    access_key_secret: Option<Secret>,
    transport: Option<T>,
}

impl<T> Default for SlsWriterBuilder<T> {
    fn default() -> Self {
        Self {
            endpoint: None,
            topic: None,
            source: None,
            access_key_id: None,
            access_key_secret: None,
            transport: None,
        }
    }
}

impl<T: Transport> SlsWriterBuilder<T> {
    /// Create a new builder with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    string_setter!(
        /// Set the full target URL, including the logstore path (required).
        with_endpoint,
        endpoint
    );
    string_setter!(
        /// Set the topic attached to each log group. Defaults to empty.
        with_topic,
        topic
    );
    string_setter!(
        /// Set the source attached to each log group. Defaults to empty.
        with_source,
        source
    );
    string_setter!(
        /// Set the access key id (required).
        with_access_key_id,
        access_key_id
    );

    /// Set the access key secret used for signing (required).
    pub fn with_access_key_secret(mut self, secret: impl Into<Secret>) -> Self {
        self.access_key_secret = Some(secret.into());
        self
    }

    /// Set the HTTP client used to send requests (required).
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the settings without consuming the builder.
    pub fn validate(&self) -> Result<(), BuildError> {
        self.parse_endpoint()?;
        if self.access_key_id.is_none() {
            return Err(BuildError::MissingField("access_key_id"));
        }
        if self.access_key_secret.is_none() {
            return Err(BuildError::MissingField("access_key_secret"));
        }
        if self.transport.is_none() {
            return Err(BuildError::MissingField("transport"));
        }
        Ok(())
    }

    fn parse_endpoint(&self) -> Result<Url, BuildError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(BuildError::MissingField("endpoint"))?;
        Url::parse(endpoint).map_err(|source| BuildError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            source,
        })
    }

    /// Build the writer.
    pub fn build(self) -> Result<SlsWriter<T>, BuildError> {
        self.validate()?;
        let endpoint = self.parse_endpoint()?;
        let (Some(access_key_id), Some(access_key_secret), Some(transport)) =
            (self.access_key_id, self.access_key_secret, self.transport)
        else {
            return Err(BuildError::MissingField("credentials"));
        };
        let config = WriterConfig {
            endpoint,
            topic: self.topic.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            access_key_id,
            access_key_secret,
        };
        Ok(SlsWriter::new(config, transport))
    }
}

impl<T> fmt::Debug for SlsWriterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlsWriterBuilder")
            .field("endpoint", &self.endpoint)
            .field("topic", &self.topic)
            .field("source", &self.source)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &self.access_key_secret)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}
