//! Configuration consumed by [`SlsWriter`](super::SlsWriter).
//!
//! [`SlsWriterBuilder`](super::SlsWriterBuilder) validates and assembles these
//! values; the writer never mutates them after construction.

use url::Url;

use crate::secret::Secret;

/// Content type of the protobuf-encoded log group.
pub const CONTENT_TYPE: &str = "application/x-protobuf";
/// Protocol version announced in `x-log-apiversion`.
pub const API_VERSION: &str = "0.6.0";
/// Body compression announced in `x-log-compresstype`.
pub const COMPRESS_TYPE: &str = "lz4";
/// Signature algorithm announced in `x-log-signaturemethod`.
pub const SIGNATURE_METHOD: &str = "hmac-sha1";
/// Response header carrying the service's request identifier.
pub const REQUEST_ID_HEADER: &str = "x-log-requestid";
/// Only method the signing scheme supports.
pub const METHOD: &str = "POST";

/// Immutable settings shared by every write.
#[derive(Clone, Debug)]
pub struct WriterConfig {
    /// Full target URL, e.g. `https://project.region.example.com/logstores/store/shards/lb`.
    pub endpoint: Url,
    /// Topic attached to every log group.
    pub topic: String,
    /// Source attached to every log group.
    pub source: String,
    /// Public half of the credential pair.
    pub access_key_id: String,
    /// Signing key; masked in `Debug` output.
    pub access_key_secret: Secret,
}
