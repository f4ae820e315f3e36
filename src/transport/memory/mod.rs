// src/transport/memory/mod.rs

//! In-memory transport implementation.
//!
//! A pure in-process implementation of the domain-level `Transport` trait,
//! intended for tests and for exercising the client without a server.
//!
//! ## Semantics
//!
//! - Every posted request is recorded, in order, before it is answered.
//! - Requests are answered from a FIFO script of responses and failures.
//! - When the script is empty the transport answers `200 OK` with the body
//!   `{}`.
//! - Delivery is deterministic within a single process.
//!
//! ## Non-Goals
//!
//! This transport does not emulate sockets, partial bodies or timing.

mod transport;

pub use transport::{create_transport, MemoryController};
