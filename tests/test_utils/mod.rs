//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use lz4_flex::block::decompress;
use prost::Message as _;
use slswriter::writer::LogGroup;
use slswriter::{
    HttpResponse, SignedRequest, SlsWriter, SlsWriterBuilder, Transport, TransportError,
};

pub const ENDPOINT: &str = "http://test-project.regionid.example.com/logstores/test-logstore";

/// Transport that keeps every request it is handed and replies with `status`.
#[derive(Clone)]
pub struct CapturingTransport {
    status: u16,
    body: &'static str,
    requests: Arc<Mutex<Vec<SignedRequest>>>,
}

impl CapturingTransport {
    pub fn new(status: u16) -> Self {
        Self::with_body(status, "")
    }

    pub fn with_body(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl Transport for CapturingTransport {
    fn execute(&self, request: SignedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().expect("lock poisoned").push(request);
        Ok(HttpResponse::new(self.status)
            .with_header("x-log-requestid", "req-1")
            .with_body(self.body.as_bytes()))
    }
}

pub fn writer(transport: CapturingTransport) -> SlsWriter<CapturingTransport> {
    SlsWriterBuilder::new()
        .with_endpoint(ENDPOINT)
        .with_topic("test-topic")
        .with_source("127.0.0.1")
        .with_access_key_id("123")
        .with_access_key_secret("321")
        .with_transport(transport)
        .build()
        .expect("build writer")
}

/// Undo compression and decode the log group carried by `request`.
pub fn decode_request(request: &SignedRequest) -> LogGroup {
    let raw_size: usize = request
        .headers()
        .get("x-log-bodyrawsize")
        .and_then(|v| v.parse().ok())
        .expect("x-log-bodyrawsize header");
    let raw = decompress(request.body(), raw_size).expect("valid lz4 block");
    LogGroup::decode(raw.as_slice()).expect("valid log group")
}
