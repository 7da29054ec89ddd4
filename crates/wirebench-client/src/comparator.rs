use async_trait::async_trait;
use std::fmt;

use wirebench_common::protocol::{
    MinMaxResponse, Number, NumberList, SortedResponse, WordCountResponse,
};
use wirebench_common::Result;

/// Which wire protocol a client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Rpc,
    Http,
}

impl Protocol {
    /// Label used in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Rpc => "Binary RPC",
            Protocol::Http => "HTTP/JSON",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five-operation contract, as seen from a client.
///
/// Both [`RpcClient`](crate::RpcClient) and [`HttpClient`](crate::HttpClient)
/// implement it so the harness can drive either protocol through the same
/// code path. Methods take `&mut self` since the RPC client owns a single
/// keep-alive stream.
#[async_trait]
pub trait Comparator: Send {
    fn protocol(&self) -> Protocol;

    async fn reduce(&mut self, numbers: &[i64]) -> Result<Number>;

    async fn word_count(&mut self, content: &str) -> Result<WordCountResponse>;

    async fn min_max(&mut self, numbers: &[i64]) -> Result<MinMaxResponse>;

    async fn sort(&mut self, numbers: &[i64]) -> Result<SortedResponse>;

    async fn primes(&mut self, numbers: &[i64]) -> Result<NumberList>;
}
