//! Request signing.
//!
//! The signature is `base64(hmac-sha1(secret, canonical))` where `canonical`
//! joins, with `\n`:
//!
//! 1. the HTTP method,
//! 2. the `Content-MD5`, `Content-Type` and `Date` header values (empty when absent),
//! 3. every `x-log-*` / `x-acs-*` header as `name:value`, lower-cased and sorted,
//! 4. the escaped request path.
//!
//! Query strings are not part of the canonical resource; only query-less POST
//! requests can be signed.

use std::collections::BTreeMap;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::SignError;
use crate::secret::Secret;

use super::headers::Headers;

type HmacSha1 = Hmac<Sha1>;

const CUSTOM_HEADER_PREFIXES: [&str; 2] = ["x-log-", "x-acs-"];

fn is_custom_header(name: &str) -> bool {
    CUSTOM_HEADER_PREFIXES.iter().any(|prefix| {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Render the vendor headers as sorted `name:value` lines.
fn canonical_headers(headers: &Headers) -> Vec<String> {
    let mut grouped: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for (name, value) in headers.iter().filter(|(name, _)| is_custom_header(name)) {
        grouped
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value);
    }
    let mut lines: Vec<String> = grouped
        .into_iter()
        .map(|(name, values)| format!("{name}:{}", values.join(",").trim()))
        .collect();
    lines.sort();
    lines
}

/// Build the string that gets signed.
pub(crate) fn canonical_string(method: &str, headers: &Headers, resource: &str) -> String {
    let mut parts = vec![
        method.to_owned(),
        headers.get("Content-MD5").unwrap_or_default().to_owned(),
        headers.get("Content-Type").unwrap_or_default().to_owned(),
        headers.get("Date").unwrap_or_default().to_owned(),
    ];
    parts.extend(canonical_headers(headers));
    parts.push(resource.to_owned());
    parts.join("\n")
}

/// Compute the request signature for `method`, `headers` and the escaped
/// `resource` path.
///
/// The result does not depend on header insertion order.
///
/// # Errors
///
/// Returns [`SignError`] if the HMAC cannot be keyed with `secret`.
pub fn signature(
    secret: &Secret,
    method: &str,
    headers: &Headers,
    resource: &str,
) -> Result<String, SignError> {
    let mut mac = HmacSha1::new_from_slice(secret.expose()).map_err(|_| SignError)?;
    mac.update(canonical_string(method, headers, resource).as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}
