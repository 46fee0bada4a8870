//! Transport seam between the writer and an HTTP client.
//!
//! The writer never configures timeouts, retries, pooling, or TLS; those are
//! properties of whatever client implements [`Transport`]. An implementation
//! for [`ureq::Agent`] is provided.

use std::fmt;
use std::io::{self, Read};

use crate::error::TransportError;

use super::request::SignedRequest;

/// Blocking HTTP client capable of executing a [`SignedRequest`].
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the response.
    ///
    /// Every status code must be returned as a response; only failures to
    /// obtain a response at all are errors.
    fn execute(&self, request: SignedRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Response returned by a [`Transport`].
///
/// The body is a reader owned by the response and released when the response
/// is dropped.
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Box<dyn Read + Send>,
}

impl HttpResponse {
    /// Response with `status`, no headers and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Box::new(io::empty()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Read + Send + 'static) -> Self {
        self.body = Box::new(body);
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// First header value under `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl From<ureq::Response> for HttpResponse {
    fn from(response: ureq::Response) -> Self {
        let headers = response
            .headers_names()
            .into_iter()
            .filter_map(|name| {
                let value = response.header(&name)?.to_owned();
                Some((name, value))
            })
            .collect();
        Self {
            status: response.status(),
            headers,
            body: response.into_reader(),
        }
    }
}

impl Transport for ureq::Agent {
    fn execute(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        let (method, url, headers, body) = request.into_parts();
        let mut req = self.request_url(method, &url);
        for (name, value) in headers.iter() {
            req = req.set(name, value);
        }
        match req.send_bytes(&body) {
            Ok(response) => Ok(response.into()),
            // ureq reports 4xx/5xx as errors; the validator needs the body.
            Err(ureq::Error::Status(_, response)) => Ok(response.into()),
            Err(ureq::Error::Transport(err)) => Err(TransportError::new(err)),
        }
    }
}
