//! Settings resolution for the CLI.
//!
//! Bench targets are resolved flag first, then environment variable, then
//! the local default, so the same binary works on a laptop and inside a
//! compose network where servers are reached by service name.

use anyhow::{anyhow, Result};

pub const DEFAULT_RPC_BIND: &str = "0.0.0.0:50051";
pub const DEFAULT_HTTP_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_RPC_TARGET: &str = "127.0.0.1:50051";
pub const DEFAULT_HTTP_TARGET: &str = "http://127.0.0.1:5000";

pub const RPC_ADDR_ENV: &str = "WIREBENCH_RPC_ADDR";
pub const HTTP_URL_ENV: &str = "WIREBENCH_HTTP_URL";

/// Picks the flag value, else the environment value, else `default`.
pub fn resolve(flag: Option<String>, env_value: Option<String>, default: &str) -> String {
    flag.or(env_value)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Resolves a target against the process environment.
pub fn resolve_from_env(flag: Option<String>, env_var: &str, default: &str) -> String {
    resolve(flag, std::env::var(env_var).ok(), default)
}

/// Validates that a URL string starts with http:// or https://
pub fn validate_http_url(url: &str, description: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!(
            "Invalid {}: '{}' must start with http:// or https://",
            description,
            url
        ))
    }
}

/// Parses a comma-separated list such as `5,1,9,3,7`.
///
/// Whitespace around items is ignored. An empty string yields an empty
/// list.
pub fn parse_numbers(input: &str) -> Result<Vec<i64>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<i64>()
                .map_err(|e| anyhow!("Invalid number '{}' in --numbers: {}", item, e))
        })
        .collect()
}

pub fn validate_positive(value: usize, name: &str) -> Result<usize> {
    if value == 0 {
        Err(anyhow!("{} must be at least 1", name))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_flag() {
        let value = resolve(
            Some("10.0.0.1:50051".into()),
            Some("rpc-server:50051".into()),
            DEFAULT_RPC_TARGET,
        );
        assert_eq!(value, "10.0.0.1:50051");
    }

    #[test]
    fn test_resolve_falls_back_to_env_then_default() {
        let value = resolve(None, Some("rpc-server:50051".into()), DEFAULT_RPC_TARGET);
        assert_eq!(value, "rpc-server:50051");

        let value = resolve(None, None, DEFAULT_HTTP_TARGET);
        assert_eq!(value, "http://127.0.0.1:5000");

        let value = resolve(None, Some("  ".into()), DEFAULT_RPC_TARGET);
        assert_eq!(value, DEFAULT_RPC_TARGET);
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("http://127.0.0.1:5000", "HTTP server URL").is_ok());
        assert!(validate_http_url("https://rest-server:5000", "HTTP server URL").is_ok());

        let err = validate_http_url("127.0.0.1:5000", "HTTP server URL").unwrap_err();
        assert!(err.to_string().contains("must start with http:// or https://"));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("5,1,9,3,7").unwrap(), vec![5, 1, 9, 3, 7]);
        assert_eq!(parse_numbers(" -4, 0 ,12 ").unwrap(), vec![-4, 0, 12]);
        assert_eq!(parse_numbers("").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_numbers_rejects_garbage() {
        assert!(parse_numbers("1,two,3").is_err());
        assert!(parse_numbers("1,,3").is_err());
        assert!(parse_numbers("1.5").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert_eq!(validate_positive(5, "runs").unwrap(), 5);
        assert_eq!(
            validate_positive(0, "workers").unwrap_err().to_string(),
            "workers must be at least 1"
        );
    }
}
