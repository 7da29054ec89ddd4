//! wirebench Client
//!
//! Clients for both protocols behind one [`Comparator`] trait, plus the
//! [`Harness`] that times them side by side and prints the report.
//!
//! ```no_run
//! use wirebench_client::{BenchmarkConfig, Harness};
//!
//! # async fn run() -> wirebench_common::Result<()> {
//! let harness = Harness::new(BenchmarkConfig::default());
//! harness
//!     .run("127.0.0.1:50051", "http://127.0.0.1:5000", &mut std::io::stdout())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod comparator;
pub mod harness;
pub mod http_client;
pub mod report;
pub mod rpc_client;

pub use comparator::{Comparator, Protocol};
pub use harness::{
    time_and_run, BenchmarkConfig, Harness, Operation, ProtocolResult, Timing, DEFAULT_NUMBERS,
    DEFAULT_RUNS, DEFAULT_TEXT,
};
pub use http_client::HttpClient;
pub use rpc_client::RpcClient;
