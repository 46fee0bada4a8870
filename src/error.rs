//! Error types surfaced by the writer.
//!
//! Every failure of a single [`write_message`](crate::SlsWriter::write_message)
//! call maps to exactly one [`WriteError`] variant. Service rejections carry a
//! structured [`VendorError`] so callers can branch on the failure class
//! without inspecting message text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a batch write.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Serialising the log group failed.
    #[error("failed to encode log group: {0}")]
    Encode(#[from] prost::EncodeError),
    /// The block compressor rejected the payload.
    #[error("failed to compress log group: {0}")]
    Compress(#[from] lz4_flex::block::CompressError),
    /// The HTTP request could not be assembled or signed.
    #[error(transparent)]
    BuildRequest(#[from] BuildRequestError),
    /// The injected transport failed before a response was received.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    /// The service rejected the batch.
    #[error("service rejected batch: {0}")]
    Vendor(#[from] VendorError),
    /// The service returned an error status with an unreadable body.
    #[error("failed to decode error response: {0}")]
    ResponseDecode(#[from] serde_json::Error),
}

impl WriteError {
    /// The structured service error, if the service rejected the batch.
    pub fn vendor(&self) -> Option<&VendorError> {
        match self {
            Self::Vendor(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors raised while assembling the HTTP request.
#[derive(Debug, Error)]
pub enum BuildRequestError {
    /// The endpoint cannot be used as a request target.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Computing the request signature failed.
    #[error(transparent)]
    Sign(#[from] SignError),
}

/// Failure to compute the HMAC signature.
#[derive(Debug, Error)]
#[error("failed to sign request: HMAC key rejected")]
pub struct SignError;

/// Opaque failure reported by a [`Transport`](crate::Transport).
#[derive(Debug)]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl TransportError {
    /// Wrap a transport-specific error.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(err.into())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Broad class of a [`VendorError`], used for caller retry policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VendorErrorKind {
    /// Credentials were missing, invalid, or the signature did not match.
    Unauthorized,
    /// The request was malformed or referenced a missing resource.
    InvalidRequest,
    /// A write quota was exceeded.
    Throttled,
    /// The service failed internally.
    Server,
    /// Anything not covered above.
    Other,
}

/// Structured error returned by the ingestion service.
///
/// Only `code` and `message` travel in the JSON body; the HTTP status and
/// request id come from the response line and headers. `Display` renders the
/// JSON body shape, so the rendered error round-trips to what the service sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorError {
    #[serde(skip)]
    pub http_code: u16,
    #[serde(rename = "errorCode", default)]
    pub code: String,
    #[serde(rename = "errorMessage", default)]
    pub message: String,
    #[serde(skip)]
    pub request_id: String,
}

impl VendorError {
    /// Render the JSON body form of the error.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "errorCode": self.code,
            "errorMessage": self.message,
        })
        .to_string()
    }

    /// Classify the error from its vendor code, falling back to the status.
    pub fn kind(&self) -> VendorErrorKind {
        match self.code.as_str() {
            "Unauthorized" | "SignatureNotMatch" | "InvalidAccessKeyId" | "RequestTimeExpired" => {
                return VendorErrorKind::Unauthorized;
            }
            "WriteQuotaExceed" | "ShardWriteQuotaExceed" | "ProjectQuotaExceed"
            | "ExceedQuota" => return VendorErrorKind::Throttled,
            "InternalServerError" | "ServerBusy" | "RequestTimeout" => {
                return VendorErrorKind::Server;
            }
            _ => {}
        }
        match self.http_code {
            401 | 403 => VendorErrorKind::Unauthorized,
            429 => VendorErrorKind::Throttled,
            400..=499 => VendorErrorKind::InvalidRequest,
            500..=599 => VendorErrorKind::Server,
            _ => VendorErrorKind::Other,
        }
    }
}

impl fmt::Display for VendorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl std::error::Error for VendorError {}
