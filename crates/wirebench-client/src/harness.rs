//! Benchmark harness
//!
//! Drives each protocol through the five operations in a fixed order,
//! timing every call over `runs` sequential repetitions. The first error
//! in a protocol's sequence (including failing to connect) stops that
//! protocol and marks its whole result set as failed; the other protocol
//! still runs.

use std::io::Write;
use std::time::Instant;

use wirebench_common::protocol::Reply;
use wirebench_common::Result;

use crate::comparator::{Comparator, Protocol};
use crate::http_client::HttpClient;
use crate::report;
use crate::rpc_client::RpcClient;

pub const DEFAULT_RUNS: usize = 5;
pub const DEFAULT_NUMBERS: [i64; 5] = [5, 1, 9, 3, 7];
pub const DEFAULT_TEXT: &str = "hello world this is a test hello world";

/// Inputs shared by every call of a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub numbers: Vec<i64>,
    pub text: String,
    pub runs: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            numbers: DEFAULT_NUMBERS.to_vec(),
            text: DEFAULT_TEXT.to_string(),
            runs: DEFAULT_RUNS,
        }
    }
}

impl BenchmarkConfig {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs.max(1);
        self
    }

    pub fn with_numbers(mut self, numbers: impl Into<Vec<i64>>) -> Self {
        self.numbers = numbers.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// The benchmarked operations, in harness order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ProcessData,
    WordCount,
    MinMax,
    Sort,
    Primes,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ProcessData,
        Operation::WordCount,
        Operation::MinMax,
        Operation::Sort,
        Operation::Primes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ProcessData => "ProcessData",
            Operation::WordCount => "WordCount",
            Operation::MinMax => "MinMax",
            Operation::Sort => "Sort",
            Operation::Primes => "Primes",
        }
    }

    /// Issues this operation once through `client`.
    pub async fn invoke<C>(&self, client: &mut C, config: &BenchmarkConfig) -> Result<Reply>
    where
        C: Comparator + ?Sized,
    {
        let reply = match self {
            Operation::ProcessData => Reply::Reduce(client.reduce(&config.numbers).await?),
            Operation::WordCount => Reply::WordCount(client.word_count(&config.text).await?),
            Operation::MinMax => Reply::MinMax(client.min_max(&config.numbers).await?),
            Operation::Sort => Reply::Sort(client.sort(&config.numbers).await?),
            Operation::Primes => Reply::Primes(client.primes(&config.numbers).await?),
        };
        Ok(reply)
    }
}

/// Mean latency of one operation plus the reply from its last run.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub mean_ms: f64,
    pub reply: Reply,
}

/// Runs `operation` `config.runs` times back to back and averages the
/// wall-clock time of each call.
pub async fn time_and_run<C>(client: &mut C, operation: Operation, config: &BenchmarkConfig) -> Result<Timing>
where
    C: Comparator + ?Sized,
{
    let runs = config.runs.max(1);

    let start = Instant::now();
    let mut reply = operation.invoke(client, config).await?;
    let mut total_secs = start.elapsed().as_secs_f64();

    for _ in 1..runs {
        let start = Instant::now();
        reply = operation.invoke(client, config).await?;
        total_secs += start.elapsed().as_secs_f64();
    }

    let mean_ms = total_secs / runs as f64 * 1000.0;
    tracing::debug!("{} {}: {:.4} ms", client.protocol(), operation.name(), mean_ms);

    Ok(Timing { mean_ms, reply })
}

/// Everything the latency table needs about one protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolResult {
    pub protocol: Protocol,
    /// Mean latency per operation in harness order, or the error that
    /// stopped the protocol.
    pub outcome: std::result::Result<Vec<(Operation, f64)>, String>,
}

impl ProtocolResult {
    pub fn failed(protocol: Protocol, error: impl Into<String>) -> Self {
        Self {
            protocol,
            outcome: Err(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Mean latency for `operation`, `None` if the protocol failed.
    pub fn mean_ms(&self, operation: Operation) -> Option<f64> {
        let timings = self.outcome.as_ref().ok()?;
        timings
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, ms)| *ms)
    }
}

pub struct Harness {
    config: BenchmarkConfig,
}

impl Harness {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Runs the whole benchmark: binary RPC first, then HTTP/JSON, then
    /// the latency table. Only a failed write to `out` aborts the run.
    pub async fn run<W: Write>(&self, rpc_addr: &str, http_url: &str, out: &mut W) -> Result<Vec<ProtocolResult>> {
        report::write_input_banner(out, &self.config)?;
        writeln!(out, "\n--- Running Program Processes ---")?;

        let mut results = Vec::with_capacity(2);

        let rpc = RpcClient::connect(rpc_addr).await;
        results.push(self.run_protocol(Protocol::Rpc, rpc, out).await?);

        let http = HttpClient::new(http_url);
        results.push(self.run_protocol(Protocol::Http, http, out).await?);

        report::write_latency_table(out, &results, self.config.runs)?;
        report::write_closing_banner(out)?;
        out.flush()?;

        Ok(results)
    }

    /// Runs every operation against one protocol, echoing each result.
    ///
    /// `client` is the outcome of connecting; a connect error fails the
    /// protocol the same way a failed call does.
    pub async fn run_protocol<C, W>(
        &self,
        protocol: Protocol,
        client: Result<C>,
        out: &mut W,
    ) -> Result<ProtocolResult>
    where
        C: Comparator,
        W: Write,
    {
        writeln!(out, "\n--- {} Processes ---", protocol)?;

        let mut client = match client {
            Ok(client) => client,
            Err(e) => return Self::fail(protocol, e.to_string(), out),
        };

        let mut timings = Vec::with_capacity(Operation::ALL.len());
        for operation in Operation::ALL {
            match time_and_run(&mut client, operation, &self.config).await {
                Ok(timing) => {
                    report::write_echo(out, &timing.reply, &self.config)?;
                    timings.push((operation, timing.mean_ms));
                }
                Err(e) => return Self::fail(protocol, e.to_string(), out),
            }
        }

        tracing::info!("{} benchmark finished", protocol);
        Ok(ProtocolResult {
            protocol,
            outcome: Ok(timings),
        })
    }

    fn fail<W: Write>(protocol: Protocol, error: String, out: &mut W) -> Result<ProtocolResult> {
        tracing::warn!("{} benchmark failed: {}", protocol, error);
        writeln!(out, "{} Error: {}", protocol, error)?;
        out.flush()?;
        Ok(ProtocolResult::failed(protocol, error))
    }
}
