// src/client/mod.rs
//! Execution engine.
//!
//! This module contains the core [`RpcClient`] type, which turns a remote
//! method identifier plus an ordered parameter list into one HTTP exchange.
//!
//! # Exchange styles
//!
//! - **Blocking-style** ([`RpcClient::execute`]): POSTs to
//!   `{method}.common.kdsvc` relative to the base address, waits for the
//!   whole body and parses it as JSON.
//! - **Non-blocking-style** ([`RpcClient::execute_async`]): POSTs to
//!   `/a/{method}.common.kdsvc`, settles with the raw response text and logs
//!   the exchange.
//!
//! Both build a fresh [`RequestEnvelope`] per call and attach the session
//! cookie. Only the blocking style writes the session back.
//!
//! # Concurrency
//!
//! The client is cheap to clone and can be shared between tasks. With
//! `serialize_exchanges` enabled (the default) blocking-style exchanges pass
//! through an exchange gate one at a time in the order they were issued, so
//! each one sees the cookie written by the previously issued one. The place in
//! line is taken when the call is made, before any task is spawned. Nothing is retried and no timeout is imposed; use
//! [`RpcClient::execute_with_timeout`] to bound a call from the outside.

mod pending;
mod turnstile;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, COOKIE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time;
use url::Url;

pub use pending::PendingExchange;

use turnstile::{Ticket, Turnstile};

use crate::protocol::{service_path, ExchangeMode, RequestEnvelope};
use crate::session::SessionState;
use crate::{
    // ---
    transport_selector,
    ClientConfig,
    HttpRequest,
    HttpResponse,
    Result,
    RpcError,
    TransportKind,
    TransportPtr,
};

/// Running client instance.
///
/// Cheap to clone (internally `Arc`-backed). Clones share the transport and
/// the session.
#[derive(Clone)]
pub struct RpcClient {
    inner: Arc<Inner>,
}

struct Inner {
    // ---
    transport: TransportPtr,
    base_url: Url,
    headers: HeaderMap,
    session: SessionState,

    /// Orders blocking-style exchanges by issue when they are serialized.
    exchange_gate: Option<Arc<Turnstile>>,
    async_cookies: bool,
}

impl RpcClient {
    // ---

    /// Create a client with the transport selected from the base address.
    ///
    /// For an `https` base address the configured key and certificate are
    /// read here; for `http` no file is touched.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the base address is invalid or neither `http` nor `https`
    /// - a header override is invalid
    /// - the identity files are missing, unreadable or unusable
    pub fn new(config: ClientConfig) -> Result<Self> {
        // ---
        let selection = transport_selector::select(&config)?;
        let transport = crate::create_http_transport(&selection)?;

        Ok(Self::from_parts(
            transport,
            selection.base_url,
            selection.headers,
            &config,
        ))
    }

    /// Create a client with an explicitly provided transport.
    ///
    /// The transport is used as-is, so no identity material is loaded even
    /// for an `https` base address. This is the constructor you want for
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns error if the base address or a header override is invalid.
    pub fn with_transport(transport: TransportPtr, config: ClientConfig) -> Result<Self> {
        // ---
        let (base_url, _) = transport_selector::resolve_base_url(&config.base_url)?;
        let headers = transport_selector::default_headers(&config.user_agent, &config.headers)?;

        Ok(Self::from_parts(transport, base_url, headers, &config))
    }

    fn from_parts(
        transport: TransportPtr,
        base_url: Url,
        headers: HeaderMap,
        config: &ClientConfig,
    ) -> Self {
        // ---
        let inner = Inner {
            transport,
            base_url,
            headers,
            session: SessionState::new(),
            exchange_gate: config
                .serialize_exchanges
                .then(|| Arc::new(Turnstile::default())),
            async_cookies: config.async_cookies,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Base server address.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Plain or encrypted.
    pub fn transport_kind(&self) -> TransportKind {
        self.inner.transport.kind()
    }

    /// Session cookie state shared by this client and its clones.
    pub fn session(&self) -> &SessionState {
        &self.inner.session
    }

    /// Run one blocking-style exchange and return the parsed JSON body.
    ///
    /// A well-formed JSON body is returned as-is even when it describes a
    /// business-level failure; interpreting it is up to the caller.
    ///
    /// # Errors
    ///
    /// - `RpcError::Serialization` - the envelope cannot be encoded
    /// - `RpcError::Http` / `RpcError::Transport` - the exchange failed at the network layer
    /// - `RpcError::Protocol` - the response body is not valid JSON
    pub async fn execute(&self, method: &str, parameters: Vec<Value>) -> Result<Value> {
        // ---
        let turn = self.take_turn();
        let envelope = RequestEnvelope::new(parameters);
        self.blocking_exchange(turn, method, &envelope).await
    }

    /// [`execute`](Self::execute), then deserialize the body into `T`.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus `RpcError::Protocol` when the JSON
    /// does not have the shape of `T`.
    pub async fn execute_as<T>(&self, method: &str, parameters: Vec<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        // ---
        let value = self.execute(method, parameters).await?;
        let body = value.to_string();
        serde_json::from_value(value).map_err(|source| RpcError::Protocol { source, body })
    }

    /// Run a blocking-style exchange bounded by `timeout`.
    ///
    /// The deadline is applied around the exchange; when it elapses the
    /// in-flight request is dropped and its session write never happens.
    ///
    /// # Errors
    ///
    /// `RpcError::Timeout` when the deadline elapses, otherwise as
    /// [`execute`](Self::execute).
    pub async fn execute_with_timeout(
        &self,
        method: &str,
        parameters: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value> {
        // ---
        time::timeout(timeout, self.execute(method, parameters))
            .await
            .map_err(|_| RpcError::Timeout)?
    }

    /// Issue a blocking-style exchange now and return its deferred outcome.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn_execute(
        &self,
        method: impl Into<String>,
        parameters: Vec<Value>,
    ) -> PendingExchange<Value> {
        // ---
        let turn = self.take_turn();
        let method = method.into();
        let envelope = RequestEnvelope::new(parameters);
        let (settler, pending) = PendingExchange::channel(envelope.correlation_id.clone());

        let client = self.clone();
        tokio::spawn(async move {
            let outcome = client.blocking_exchange(turn, &method, &envelope).await;
            settler.settle(outcome);
        });

        pending
    }

    /// Issue a non-blocking-style exchange now and return its deferred outcome.
    ///
    /// The outcome is the raw response text once the response stream ends.
    /// Status, headers and body are logged at `debug` level.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn execute_async(
        &self,
        method: impl Into<String>,
        parameters: Vec<Value>,
    ) -> PendingExchange<String> {
        // ---
        let method = method.into();
        let envelope = RequestEnvelope::new(parameters);
        let (settler, pending) = PendingExchange::channel(envelope.correlation_id.clone());

        let client = self.clone();
        tokio::spawn(async move {
            let outcome = client.non_blocking_exchange(&method, &envelope).await;
            settler.settle(outcome);
        });

        pending
    }

    /// Place in the exchange order, drawn at issue time.
    fn take_turn(&self) -> Option<Ticket> {
        self.inner.exchange_gate.as_ref().map(Turnstile::take)
    }

    /// The turn is held until this returns, covering the session read and write.
    async fn blocking_exchange(
        &self,
        turn: Option<Ticket>,
        method: &str,
        envelope: &RequestEnvelope,
    ) -> Result<Value> {
        // ---
        let body = envelope.to_bytes()?;

        if let Some(ticket) = &turn {
            ticket.wait().await;
        }

        let cookie = self.inner.session.read();
        let request = self.build_request(ExchangeMode::Blocking, method, body, cookie.as_deref())?;

        tracing::debug!(
            rid = %envelope.correlation_id,
            method,
            url = %request.url,
            "issuing blocking exchange"
        );

        let response = self.inner.transport.post(request).await?;
        self.inner.session.record_response(&response.headers);

        tracing::debug!(
            rid = %envelope.correlation_id,
            status = %response.status,
            bytes = response.body.len(),
            "blocking exchange completed"
        );

        parse_body(&response)
    }

    async fn non_blocking_exchange(
        &self,
        method: &str,
        envelope: &RequestEnvelope,
    ) -> Result<String> {
        // ---
        let body = envelope.to_bytes()?;

        let cookie = if self.inner.async_cookies {
            self.inner.session.read()
        } else {
            None
        };
        let request =
            self.build_request(ExchangeMode::NonBlocking, method, body, cookie.as_deref())?;

        tracing::debug!(
            rid = %envelope.correlation_id,
            method,
            url = %request.url,
            "issuing non-blocking exchange"
        );

        let response = self.inner.transport.post(request).await?;
        let text = response.text();

        tracing::debug!(
            rid = %envelope.correlation_id,
            status = %response.status,
            headers = ?response.headers,
            body = %text,
            "non-blocking exchange completed"
        );

        Ok(text)
    }

    fn build_request(
        &self,
        mode: ExchangeMode,
        method: &str,
        body: bytes::Bytes,
        cookie: Option<&str>,
    ) -> Result<HttpRequest> {
        // ---
        let url = self.inner.base_url.join(&service_path(method, mode))?;

        let mut headers = self.inner.headers.clone();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        // A cookie that is not valid header text is left off rather than failing the call.
        match cookie.map(HeaderValue::from_str) {
            Some(Ok(value)) => {
                headers.insert(COOKIE, value);
            }
            Some(Err(_)) => {
                tracing::warn!("session cookie is not valid header text, omitted");
            }
            None => {}
        }

        Ok(HttpRequest { url, headers, body })
    }
}

fn parse_body(response: &HttpResponse) -> Result<Value> {
    // ---
    serde_json::from_slice(&response.body).map_err(|source| {
        let body = response.text();
        tracing::warn!(status = %response.status, error = %source, "response body is not JSON");
        RpcError::Protocol { source, body }
    })
}
