// src/transport/http.rs

//! HTTP/HTTPS transport backed by `reqwest`.
//!
//! One `reqwest::Client` per transport instance; its connection pool is the
//! only pooling the crate does. For encrypted transports the client presents
//! the identity loaded by the transport selector.

use std::sync::Arc;

use bytes::BytesMut;
use reqwest::{Client, Identity};

use crate::transport_selector::TransportSelection;
use crate::{HttpRequest, HttpResponse, Result, RpcError, Transport, TransportKind, TransportPtr};

struct HttpTransport {
    // ---
    client: Client,
    kind: TransportKind,
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    // ---

    fn kind(&self) -> TransportKind {
        self.kind
    }

    /// Send the request and collect the streamed body chunk by chunk.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        // ---
        let mut response = self
            .client
            .post(request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();

        let mut body = BytesMut::new();
        let mut chunks = 0usize;
        while let Some(chunk) = response.chunk().await? {
            chunks += 1;
            body.extend_from_slice(&chunk);
        }

        tracing::trace!(%status, chunks, bytes = body.len(), "response body received");

        Ok(HttpResponse {
            status,
            headers,
            body: body.freeze(),
        })
    }
}

/// Create the HTTP transport described by `selection`.
///
/// Default headers are not installed on the `reqwest` client; the execution
/// engine sends the complete header set with every request.
///
/// # Errors
///
/// Returns `RpcError::Identity` if the loaded key/certificate pair is not
/// usable, or `RpcError::ClientBuild` if the TLS backend fails to initialize.
pub fn create_transport(selection: &TransportSelection) -> Result<TransportPtr> {
    // ---
    let mut builder = Client::builder();

    if !selection.use_system_proxy {
        builder = builder.no_proxy();
    }

    if let Some(pem) = &selection.identity {
        let identity = Identity::from_pem(pem.as_bytes()).map_err(RpcError::Identity)?;
        builder = builder.identity(identity);
    }

    let client = builder.build().map_err(RpcError::ClientBuild)?;

    Ok(Arc::new(HttpTransport {
        client,
        kind: selection.kind,
    }))
}
