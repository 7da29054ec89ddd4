//! The `Comparator` service: one dispatch point for both servers.

use wirebench_common::ops::{self, OpError};
use wirebench_common::protocol::{
    Call, MinMaxResponse, Number, NumberList, Reply, SortedResponse, WordCountResponse,
};

/// Stateless implementation of the five operations.
///
/// Holds no data, so a single instance is shared by every worker and every
/// HTTP connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparatorService;

impl ComparatorService {
    pub fn new() -> Self {
        Self
    }

    /// Executes one call. The reply variant always matches the call variant.
    pub fn handle(&self, call: Call) -> Result<Reply, OpError> {
        tracing::debug!("Handling {} call", call.method());

        let reply = match call {
            Call::Reduce(input) => Reply::Reduce(Number {
                value: ops::reduce(&input.numbers)?,
            }),
            Call::WordCount(input) => Reply::WordCount(WordCountResponse {
                counts: ops::word_count(&input.content),
            }),
            Call::MinMax(input) => {
                let (min, max) = ops::min_max(&input.numbers)?;
                Reply::MinMax(MinMaxResponse { min, max })
            }
            Call::Sort(input) => {
                let (ascending, descending) = ops::sort(&input.numbers);
                Reply::Sort(SortedResponse {
                    ascending,
                    descending,
                })
            }
            Call::Primes(input) => Reply::Primes(NumberList {
                numbers: ops::primes(&input.numbers),
            }),
        };

        Ok(reply)
    }
}
