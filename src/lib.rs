//! JSON envelope RPC client for ERP web API services over HTTP(S)
//!
//! This library turns a remote method name plus an ordered list of JSON
//! parameters into one HTTP POST carrying a JSON envelope, and carries the
//! server's session cookie from one exchange to the next. It handles
//! correlation id generation, transport selection from the address scheme,
//! client-certificate loading for encrypted transports, and both the
//! blocking-style (parsed JSON) and non-blocking-style (raw text) exchanges.
//!
//! [`WebApiClient`] layers named business operations (login, save, submit,
//! audit, bill query, ...) on top of [`RpcClient`], checking each call's
//! arguments against a static operation table before any I/O.
//!

// Import all sub modules once...
mod client;
mod domain;
mod facade;
mod protocol;
mod transport;

mod client_config;
mod session;
mod transport_selector;

mod error;

// Re-export main types
pub use client::{PendingExchange, RpcClient};
pub use facade::WebApiClient;

pub use client_config::{
    //
    ClientConfig,
    IdentityFiles,
    DEFAULT_CERT_PATH,
    DEFAULT_KEY_PATH,
    DEFAULT_USER_AGENT,
};

pub use error::{Result, RpcError};

pub use transport::{create_http_transport, create_memory_transport, MemoryController};

pub use transport_selector::{
    //
    default_headers,
    load_identity,
    resolve_base_url,
    select as select_transport,
    IdentityPem,
    TransportSelection,
    JSON_CONTENT_TYPE,
};

pub use session::{set_cookie_value, SessionState};

// --- public re-exports
pub use domain::{
    //
    HttpRequest,
    HttpResponse,
    Transport,
    TransportKind,
    TransportPtr,
};

pub use protocol::{
    //
    service_path,
    CorrelationId,
    ExchangeMode,
    RequestEnvelope,
    ASYNC_SEGMENT,
    PROTOCOL_VERSION,
    SERVICE_SUFFIX,
};

pub use facade::{
    //
    operations,
    resolve_login,
    LoginRequest,
    ParamKind,
    RemoteMethod,
    DEFAULT_LCID,
};
