//! The wirebench operation set.
//!
//! Five pure functions shared by the binary-RPC and HTTP servers. None of
//! them holds state between calls, so both servers can run any number of
//! them concurrently without coordination.

use std::collections::HashMap;
use thiserror::Error;

/// Errors an operation can report for a well-formed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    /// The operation needs at least one number.
    #[error("{0} requires at least one number")]
    EmptyInput(&'static str),

    /// The sum of squares does not fit in a signed 64-bit integer.
    #[error("sum of squares overflows a 64-bit integer")]
    Overflow,
}

/// Map stage of [`reduce`]: every element squared.
///
/// Saturates instead of overflowing, so it is safe to call on any input
/// when only a display of the intermediate values is needed.
pub fn squares(numbers: &[i64]) -> Vec<i64> {
    numbers.iter().map(|n| n.saturating_mul(*n)).collect()
}

/// Sum of squares of all elements. An empty slice reduces to `0`.
pub fn reduce(numbers: &[i64]) -> Result<i64, OpError> {
    numbers.iter().try_fold(0i64, |acc, n| {
        n.checked_mul(*n)
            .and_then(|sq| acc.checked_add(sq))
            .ok_or(OpError::Overflow)
    })
}

/// Counts whitespace-delimited tokens.
///
/// Tokens are compared exactly: case is significant and punctuation is
/// kept as part of the token. Separators are Unicode whitespace plus the
/// information separators U+001C..=U+001F.
pub fn word_count(content: &str) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for word in content.split(is_separator).filter(|word| !word.is_empty()) {
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }
    counts
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Smallest and largest element, in that order.
pub fn min_max(numbers: &[i64]) -> Result<(i64, i64), OpError> {
    let first = *numbers.first().ok_or(OpError::EmptyInput("MinMax"))?;
    Ok(numbers
        .iter()
        .fold((first, first), |(min, max), &n| (min.min(n), max.max(n))))
}

/// Ascending and descending permutations of the input.
pub fn sort(numbers: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let mut ascending = numbers.to_vec();
    ascending.sort();
    let descending = ascending.iter().rev().copied().collect();
    (ascending, descending)
}

/// Trial division up to `floor(sqrt(n))`. Anything `<= 1` is not prime.
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    let mut i = 2;
    // i <= n / i avoids overflowing i * i near i64::MAX
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// The primes of `numbers`, in input order (duplicates kept).
pub fn primes(numbers: &[i64]) -> Vec<i64> {
    numbers.iter().copied().filter(|n| is_prime(*n)).collect()
}
