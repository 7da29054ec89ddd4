//! Request and response payloads.
//!
//! The same types travel over both protocols: postcard-encoded inside RPC
//! frames, and as plain JSON bodies over HTTP. Field names are the JSON
//! field names of the HTTP contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A list of integers. Input of four operations and output of `Primes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumberList {
    pub numbers: Vec<i64>,
}

impl NumberList {
    pub fn new(numbers: impl Into<Vec<i64>>) -> Self {
        Self {
            numbers: numbers.into(),
        }
    }
}

/// Input of `WordCount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Text {
    pub content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Output of `Reduce`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Number {
    pub value: i64,
}

/// Output of `WordCount`.
///
/// Key order carries no meaning and is not preserved across the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCountResponse {
    pub counts: HashMap<String, u64>,
}

/// Output of `MinMax`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MinMaxResponse {
    pub min: i64,
    pub max: i64,
}

/// Output of `Sort`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortedResponse {
    pub ascending: Vec<i64>,
    pub descending: Vec<i64>,
}

/// Error body returned by the HTTP server for any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
