// src/domain/transport.rs

//! Transport domain abstractions.
//!
//! The execution engine talks to the network only through the [`Transport`]
//! trait defined here: one POST request in, one fully received response out.
//! Opening connections, writing the body and collecting streamed body chunks
//! are the implementation's business.
//!
//! Higher-level semantics such as envelopes, session cookies and JSON parsing
//! are handled by the client layer.
//!
//! Concrete implementations live under `src/transport/`.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use url::Url;

use crate::Result;

/// Transport kind chosen from the base address scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// `http`
    Plain,

    /// `https`, presenting the configured key and certificate.
    Encrypted,
}

/// An outgoing HTTP POST request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Fully resolved request URL.
    pub url: Url,
    /// Complete header set, including `Content-Length` and `Cookie`.
    pub headers: HeaderMap,
    /// Serialized request envelope.
    pub body: Bytes,
}

impl HttpRequest {
    /// Header value as text, if present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        // ---
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A completed HTTP response with its whole body collected.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        // ---
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Replace the status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Append a header. Repeated names keep every value.
    ///
    /// Names or values that are not valid HTTP are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        // ---
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        // ---
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Request/response transport.
///
/// Implementations must:
/// - send exactly the headers and body they are given,
/// - resolve only once the entire response body has been received,
/// - report connection-level failures as errors, never as responses.
///
/// They must not interpret the status code or the body, retry, or impose a
/// timeout of their own.
///
/// # Available Implementations
///
/// - `create_http_transport` - reqwest backed HTTP/HTTPS transport
/// - `create_memory_transport` - scripted in-process transport for tests
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    // ---
    /// Plain or encrypted.
    fn kind(&self) -> TransportKind;

    /// Perform one POST exchange.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Shared transport pointer.
///
/// Cheap to clone; clones share the underlying connection pool.
pub type TransportPtr = Arc<dyn Transport>;
