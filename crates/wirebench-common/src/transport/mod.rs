//! wirebench Transport Layer
//!
//! # Architecture
//!
//! - **Binary RPC**: TCP with keep-alive connections, postcard-encoded
//!   envelopes, wire format `[4-byte length prefix as u32 big-endian] + [postcard data]`
//! - **HTTP/JSON**: hyper helpers for typed JSON bodies and error responses
//!
//! # Components
//!
//! - **[`PostcardCodec`]**: Encode/decode RPC envelopes
//! - **[`TcpTransport`]**: Async TCP client transport
//! - **[`TcpServer`]**: Async TCP server
//! - **[`HttpTransport`]**: HTTP/JSON conversion helpers
//!
//! # Message Size Limits
//!
//! Frames larger than [`MAX_MESSAGE_SIZE`] (16 MiB) are rejected on both
//! sides.

pub mod codec;
pub mod http;
pub mod tcp;
pub mod tcp_server;

pub use codec::PostcardCodec;
pub use http::{HttpTransport, HyperRequest, HyperResponse};
pub use tcp::{read_frame, write_frame, TcpTransport, MAX_MESSAGE_SIZE};
pub use tcp_server::TcpServer;
