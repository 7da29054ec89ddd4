//! wirebench Common Types and Transport
//!
//! Shared foundation of the wirebench workspace: the five operations, the
//! wire types both protocols carry, and the transport layers.
//!
//! # Overview
//!
//! wirebench compares a binary RPC protocol against HTTP/JSON by exposing
//! the same operation set through both and timing calls against each:
//!
//! - **Operations** ([`ops`]): sum of squares, word count, min/max, sort,
//!   prime filter
//! - **Protocol** ([`protocol`]): payloads, RPC envelopes, error type
//! - **Transport** ([`transport`]): framed TCP for RPC, hyper helpers for HTTP
//!
//! # Wire protocol (binary RPC)
//!
//! - **Transport**: TCP with keep-alive connections
//! - **Serialization**: postcard
//! - **Message Format**: `[4-byte length prefix as u32 big-endian] + [postcard data]`
//! - **Max Message Size**: 16 MiB
//!
//! # Example
//!
//! ```
//! use wirebench_common::ops;
//! use wirebench_common::protocol::{Call, NumberList, RpcRequest};
//!
//! assert_eq!(ops::reduce(&[5, 1, 9, 3, 7]), Ok(165));
//! let request = RpcRequest::new(Call::Reduce(NumberList::new([5, 1, 9, 3, 7])));
//! assert_eq!(request.call.method(), "Reduce");
//! ```

pub mod ops;
pub mod protocol;
pub mod transport;

pub use ops::OpError;
pub use protocol::*;
