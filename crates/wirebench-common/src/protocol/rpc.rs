//! Binary-RPC envelopes for the `Comparator` service.
//!
//! A request names one of the five unary methods together with its payload;
//! the response echoes the request id and carries either the matching reply
//! or a [`Status`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::messages::{
    MinMaxResponse, Number, NumberList, SortedResponse, Text, WordCountResponse,
};

pub type RequestId = u64;

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// One call of the `Comparator` service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Call {
    Reduce(NumberList),
    WordCount(Text),
    MinMax(NumberList),
    Sort(NumberList),
    Primes(NumberList),
}

impl Call {
    /// Method name, as used in logs.
    pub fn method(&self) -> &'static str {
        match self {
            Call::Reduce(_) => "Reduce",
            Call::WordCount(_) => "WordCount",
            Call::MinMax(_) => "MinMax",
            Call::Sort(_) => "Sort",
            Call::Primes(_) => "Primes",
        }
    }
}

/// Successful result of a [`Call`]; the variant always matches the call's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Reply {
    Reduce(Number),
    WordCount(WordCountResponse),
    MinMax(MinMaxResponse),
    Sort(SortedResponse),
    Primes(NumberList),
}

impl Reply {
    pub fn method(&self) -> &'static str {
        match self {
            Reply::Reduce(_) => "Reduce",
            Reply::WordCount(_) => "WordCount",
            Reply::MinMax(_) => "MinMax",
            Reply::Sort(_) => "Sort",
            Reply::Primes(_) => "Primes",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusCode {
    /// The request was malformed or the operation rejected its input.
    InvalidArgument,
    /// The server failed while executing the call.
    Internal,
    /// The server could not take the call (e.g. worker pool closed).
    Unavailable,
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unavailable => "UNAVAILABLE",
        };
        f.write_str(name)
    }
}

/// Protocol-level error returned in place of a [`Reply`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl Status {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::Internal, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::Unavailable, message)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcRequest {
    pub id: RequestId,
    pub call: Call,
}

impl RpcRequest {
    pub fn new(call: Call) -> Self {
        Self {
            id: REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            call,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcResponse {
    pub id: RequestId,
    pub outcome: Result<Reply, Status>,
}

impl RpcResponse {
    pub fn success(id: RequestId, reply: Reply) -> Self {
        Self {
            id,
            outcome: Ok(reply),
        }
    }

    pub fn error(id: RequestId, status: Status) -> Self {
        Self {
            id,
            outcome: Err(status),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
