//! Response classification and vendor error decoding.

use serde::de::Error as _;

use crate::error::{VendorError, WriteError};

use super::config::REQUEST_ID_HEADER;
use super::transport::HttpResponse;

/// Turn a transport response into the outcome of the write.
///
/// Statuses below 400 succeed and the body is never read. Anything else is
/// decoded as a JSON [`VendorError`]. Only the first JSON value is read, so
/// trailing data is ignored and `null` yields an empty error. An empty or
/// malformed body surfaces as [`WriteError::ResponseDecode`]. The body is
/// dropped on every path.
pub(crate) fn validate_response(response: HttpResponse) -> Result<(), WriteError> {
    let status = response.status();
    if status < 400 {
        return Ok(());
    }
    let request_id = response
        .header(REQUEST_ID_HEADER)
        .unwrap_or_default()
        .to_owned();
    let decoded = serde_json::Deserializer::from_reader(response.into_body())
        .into_iter::<Option<VendorError>>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("empty error response body")))?
        .unwrap_or_default();
    Err(VendorError {
        http_code: status,
        request_id,
        ..decoded
    }
    .into())
}
