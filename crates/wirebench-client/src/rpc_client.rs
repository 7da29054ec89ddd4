//! Binary-RPC client
//!
//! Holds one keep-alive TCP connection and issues unary calls over it
//! sequentially. A server-reported [`Status`] becomes
//! [`WirebenchError::Rpc`]; a reply for the wrong method becomes
//! [`WirebenchError::InvalidResponse`].

use async_trait::async_trait;
use tokio::net::TcpStream;

use wirebench_common::protocol::error::{Result, WirebenchError};
use wirebench_common::protocol::{
    Call, MinMaxResponse, Number, NumberList, Reply, RpcRequest, SortedResponse, Text,
    WordCountResponse,
};
use wirebench_common::transport::TcpTransport;

use crate::comparator::{Comparator, Protocol};

pub struct RpcClient {
    addr: String,
    transport: TcpTransport,
    stream: TcpStream,
}

impl RpcClient {
    /// Connects to the RPC server at `addr` (`host:port`).
    pub async fn connect(addr: impl Into<String>) -> Result<Self> {
        Self::connect_with(addr, TcpTransport::new()).await
    }

    /// Connects using a preconfigured transport (e.g. a shorter connect timeout).
    pub async fn connect_with(addr: impl Into<String>, transport: TcpTransport) -> Result<Self> {
        let addr = addr.into();
        let stream = transport.connect(&addr).await?;
        tracing::debug!("Connected to RPC server at {}", addr);

        Ok(Self {
            addr,
            transport,
            stream,
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Sends one call and returns the server's reply.
    pub async fn call(&mut self, call: Call) -> Result<Reply> {
        let request = RpcRequest::new(call);
        let response = self.transport.send_request(&mut self.stream, &request).await?;

        if response.id != request.id {
            return Err(WirebenchError::InvalidResponse(format!(
                "response id {} does not match request id {}",
                response.id, request.id
            )));
        }

        response.outcome.map_err(WirebenchError::Rpc)
    }
}

fn unexpected(expected: &str, reply: Reply) -> WirebenchError {
    WirebenchError::InvalidResponse(format!(
        "expected {} reply, got {}",
        expected,
        reply.method()
    ))
}

#[async_trait]
impl Comparator for RpcClient {
    fn protocol(&self) -> Protocol {
        Protocol::Rpc
    }

    async fn reduce(&mut self, numbers: &[i64]) -> Result<Number> {
        match self.call(Call::Reduce(NumberList::new(numbers))).await? {
            Reply::Reduce(number) => Ok(number),
            other => Err(unexpected("Reduce", other)),
        }
    }

    async fn word_count(&mut self, content: &str) -> Result<WordCountResponse> {
        match self.call(Call::WordCount(Text::new(content))).await? {
            Reply::WordCount(counts) => Ok(counts),
            other => Err(unexpected("WordCount", other)),
        }
    }

    async fn min_max(&mut self, numbers: &[i64]) -> Result<MinMaxResponse> {
        match self.call(Call::MinMax(NumberList::new(numbers))).await? {
            Reply::MinMax(min_max) => Ok(min_max),
            other => Err(unexpected("MinMax", other)),
        }
    }

    async fn sort(&mut self, numbers: &[i64]) -> Result<SortedResponse> {
        match self.call(Call::Sort(NumberList::new(numbers))).await? {
            Reply::Sort(sorted) => Ok(sorted),
            other => Err(unexpected("Sort", other)),
        }
    }

    async fn primes(&mut self, numbers: &[i64]) -> Result<NumberList> {
        match self.call(Call::Primes(NumberList::new(numbers))).await? {
            Reply::Primes(primes) => Ok(primes),
            other => Err(unexpected("Primes", other)),
        }
    }
}
