//! Assembly of the signed HTTP request.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use url::{Position, Url};

use crate::error::BuildRequestError;
use crate::secret::Secret;

use super::config::{API_VERSION, COMPRESS_TYPE, CONTENT_TYPE, METHOD, SIGNATURE_METHOD};
use super::headers::Headers;
use super::sign::signature;

/// A fully signed request, ready for a [`Transport`](super::Transport).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    method: &'static str,
    url: Url,
    headers: Headers,
    body: Vec<u8>,
}

impl SignedRequest {
    pub fn method(&self) -> &str {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Compressed payload.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Split into parts for transports that consume the body.
    pub fn into_parts(self) -> (&'static str, Url, Headers, Vec<u8>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Inputs to [`build_request`].
pub(crate) struct RequestParts<'a> {
    pub endpoint: &'a Url,
    pub access_key_id: &'a str,
    pub secret: &'a Secret,
    pub raw_size: usize,
    pub body: Vec<u8>,
    pub date: DateTime<Utc>,
}

/// Format `at` as an RFC 1123 date in GMT, e.g. `Mon, 09 Nov 2015 06:03:03 GMT`.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `host[:port]` of the endpoint, as sent in the `Host` header.
fn host_header(endpoint: &Url) -> Result<&str, BuildRequestError> {
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(BuildRequestError::InvalidEndpoint(format!(
            "unsupported scheme {:?}",
            endpoint.scheme()
        )));
    }
    if endpoint.host_str().is_none_or(str::is_empty) {
        return Err(BuildRequestError::InvalidEndpoint(format!(
            "{endpoint} has no host"
        )));
    }
    Ok(&endpoint[Position::BeforeHost..Position::AfterPort])
}

/// Build the POST request carrying `parts.body` and sign it.
///
/// The headers are complete before the signature is computed; `Authorization`
/// is appended last.
pub(crate) fn build_request(parts: RequestParts<'_>) -> Result<SignedRequest, BuildRequestError> {
    let host = host_header(parts.endpoint)?;
    let content_md5 = format!("{:X}", Md5::digest(&parts.body));

    let mut headers = Headers::new();
    headers.insert("Content-Type", CONTENT_TYPE);
    headers.insert("Content-Length", parts.body.len().to_string());
    headers.insert("Content-MD5", content_md5);
    headers.insert("Date", http_date(parts.date));
    headers.insert("Host", host);
    headers.insert("x-log-apiversion", API_VERSION);
    headers.insert("x-log-bodyrawsize", parts.raw_size.to_string());
    headers.insert("x-log-compresstype", COMPRESS_TYPE);
    headers.insert("x-log-signaturemethod", SIGNATURE_METHOD);

    let sig = signature(parts.secret, METHOD, &headers, parts.endpoint.path())?;
    headers.insert(
        "Authorization",
        format!("LOG {}:{}", parts.access_key_id, sig),
    );

    Ok(SignedRequest {
        method: METHOD,
        url: parts.endpoint.clone(),
        headers,
        body: parts.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn endpoint() -> Url {
        Url::parse("http://test-project.regionid.example.com:8080/logstores/test-logstore")
            .expect("url")
    }

    fn parts<'a>(endpoint: &'a Url, secret: &'a Secret, body: &[u8]) -> RequestParts<'a> {
        RequestParts {
            endpoint,
            access_key_id: "123",
            secret,
            raw_size: 50,
            body: body.to_vec(),
            date: Utc
                .with_ymd_and_hms(2015, 11, 9, 6, 3, 3)
                .single()
                .expect("date"),
        }
    }

    #[test]
    fn formats_gmt_dates() {
        let at = Utc
            .with_ymd_and_hms(2015, 11, 9, 6, 3, 3)
            .single()
            .expect("date");
        assert_eq!(http_date(at), "Mon, 09 Nov 2015 06:03:03 GMT");
    }

    #[rstest]
    fn sets_protocol_headers(endpoint: Url) {
        let secret = Secret::from("321");
        let req = build_request(parts(&endpoint, &secret, b"hello")).expect("build");
        let headers = req.headers();

        assert_eq!(req.method(), "POST");
        assert_eq!(req.body(), b"hello");
        assert_eq!(headers.get("content-type"), Some("application/x-protobuf"));
        assert_eq!(headers.get("content-length"), Some("5"));
        assert_eq!(
            headers.get("content-md5"),
            Some("5D41402ABC4B2A76B9719D911017C592")
        );
        assert_eq!(headers.get("date"), Some("Mon, 09 Nov 2015 06:03:03 GMT"));
        assert_eq!(
            headers.get("host"),
            Some("test-project.regionid.example.com:8080")
        );
        assert_eq!(headers.get("x-log-apiversion"), Some("0.6.0"));
        assert_eq!(headers.get("x-log-bodyrawsize"), Some("50"));
        assert_eq!(headers.get("x-log-compresstype"), Some("lz4"));
        assert_eq!(headers.get("x-log-signaturemethod"), Some("hmac-sha1"));
    }

    #[rstest]
    fn authorization_carries_key_id_and_signature(endpoint: Url) {
        let secret = Secret::from("321");
        let req = build_request(parts(&endpoint, &secret, b"hello")).expect("build");

        let mut unsigned = req.headers().clone();
        unsigned.insert("Authorization", "");
        let expected = signature(&secret, "POST", &unsigned, "/logstores/test-logstore")
            .expect("sign");
        assert_eq!(
            req.headers().get("authorization"),
            Some(format!("LOG 123:{expected}").as_str())
        );
    }

    #[rstest]
    #[case("mailto:someone@example.com")]
    #[case("file:///tmp/logs")]
    fn rejects_unusable_endpoints(#[case] raw: &str) {
        let endpoint = Url::parse(raw).expect("url");
        let secret = Secret::from("321");
        let err = build_request(parts(&endpoint, &secret, b"x")).expect_err("should fail");
        assert!(matches!(err, BuildRequestError::InvalidEndpoint(_)));
    }
}
