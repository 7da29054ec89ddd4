//! wirebench Server
//!
//! The two server shells around the shared operation set:
//!
//! - [`RpcServer`]: binary RPC over framed TCP, calls run on a bounded
//!   [`WorkerPool`]
//! - [`HttpServer`]: HTTP/JSON, one POST route per operation
//!
//! Both dispatch through the stateless [`ComparatorService`].

pub mod http_router;
pub mod http_server;
pub mod rpc_server;
pub mod service;
pub mod worker_pool;

pub use http_router::{HttpRouter, Route};
pub use http_server::HttpServer;
pub use rpc_server::RpcServer;
pub use service::ComparatorService;
pub use worker_pool::{PoolConfig, WorkerPool, DEFAULT_WORKERS};
