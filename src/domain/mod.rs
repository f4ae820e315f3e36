//! Domain layer public interface.
//!
//! Defines the transport abstraction the execution engine consumes,
//! independent of any concrete HTTP client library.
//!
//! All domain consumers must import symbols via this module, not by
//! referencing individual files directly.

mod transport;

pub use transport::{
    //
    HttpRequest,
    HttpResponse,
    Transport,
    TransportKind,
    TransportPtr,
};
