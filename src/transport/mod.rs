//! Transport implementations.
//!
//! Concrete implementations of the domain-level `Transport` trait, exposed
//! only through constructor functions.
//!
//! Domain code must not depend on transport-specific types.

mod http;
mod memory;

pub use http::create_transport as create_http_transport;
pub use memory::{create_transport as create_memory_transport, MemoryController};
