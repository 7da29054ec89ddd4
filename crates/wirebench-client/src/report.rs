//! Plain-text benchmark report
//!
//! Written in four parts: the input banner, a result echo per operation
//! and protocol, the latency table, and a closing banner. Word counts are
//! echoed sorted by word so the output is deterministic.

use std::collections::BTreeMap;
use std::io::{self, Write};

use wirebench_common::ops;
use wirebench_common::protocol::Reply;

use crate::harness::{BenchmarkConfig, Operation, ProtocolResult};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn write_input_banner<W: Write>(out: &mut W, config: &BenchmarkConfig) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "--- Input Data ---")?;
    writeln!(out, "Numbers: {:?}", config.numbers)?;
    writeln!(out, "Text:    '{}'", config.text)?;
    writeln!(out, "{}\n", rule())
}

/// Echoes one decoded reply alongside the input that produced it.
pub fn write_echo<W: Write>(out: &mut W, reply: &Reply, config: &BenchmarkConfig) -> io::Result<()> {
    let numbers = &config.numbers;
    match reply {
        Reply::Reduce(number) => {
            writeln!(out, "1. MapReduce (Map: n*n, Reduce: sum)")?;
            writeln!(out, "   Input:   {:?}", numbers)?;
            writeln!(out, "   Process: {:?}", ops::squares(numbers))?;
            writeln!(out, "   Result:  {}\n", number.value)
        }
        Reply::WordCount(counts) => {
            let sorted: BTreeMap<_, _> = counts.counts.iter().collect();
            writeln!(out, "2. WordCount")?;
            writeln!(out, "   Input:  '{}'", config.text)?;
            writeln!(out, "   Result: {:?}\n", sorted)
        }
        Reply::MinMax(min_max) => {
            writeln!(out, "3. Min/Max")?;
            writeln!(out, "   Input:  {:?}", numbers)?;
            writeln!(out, "   Result: Min={}, Max={}\n", min_max.min, min_max.max)
        }
        Reply::Sort(sorted) => {
            writeln!(out, "4. Sort")?;
            writeln!(out, "   Input:      {:?}", numbers)?;
            writeln!(out, "   Ascending:  {:?}", sorted.ascending)?;
            writeln!(out, "   Descending: {:?}\n", sorted.descending)
        }
        Reply::Primes(primes) => {
            writeln!(out, "5. Primes")?;
            writeln!(out, "   Input:  {:?}", numbers)?;
            writeln!(out, "   Result: {:?}\n", primes.numbers)
        }
    }
}

/// Writes one block per protocol with the mean latency of each operation,
/// or `FAILED` for every operation of a protocol that did not finish.
pub fn write_latency_table<W: Write>(out: &mut W, results: &[ProtocolResult], runs: usize) -> io::Result<()> {
    writeln!(out, "\n\n{}", rule())?;
    writeln!(out, "--- Running Benchmarks (Average of {} runs) ---", runs)?;
    writeln!(out, "All times in milliseconds (ms)\n")?;

    let width = Operation::ALL
        .iter()
        .map(|op| op.name().len())
        .max()
        .unwrap_or(0);

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "--- {} ---", result.protocol)?;
        for (n, op) in Operation::ALL.iter().enumerate() {
            match result.mean_ms(*op) {
                Some(ms) => writeln!(out, "{}. {:<width$}: {:9.4} ms", n + 1, op.name(), ms, width = width)?,
                None => writeln!(out, "{}. {:<width$}: FAILED", n + 1, op.name(), width = width)?,
            }
        }
    }
    Ok(())
}

pub fn write_closing_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "Benchmark complete.")
}
