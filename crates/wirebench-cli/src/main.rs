//! # wirebench CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Binary RPC server with 10 workers on the default port
//! wirebench rpc-server
//!
//! # HTTP/JSON server on a custom address
//! wirebench http-server -b 127.0.0.1:5000
//!
//! # Benchmark both, 10 runs per operation
//! wirebench bench --rpc 127.0.0.1:50051 --http http://127.0.0.1:5000 -r 10
//! ```
//!
//! `bench` writes its report to stdout and its logs to stderr.

use anyhow::Result;
use argh::FromArgs;
use std::time::Duration;

use wirebench_cli::config::{self, DEFAULT_HTTP_TARGET, DEFAULT_RPC_TARGET, HTTP_URL_ENV, RPC_ADDR_ENV};
use wirebench_client::{BenchmarkConfig, Harness, DEFAULT_TEXT};
use wirebench_server::{HttpServer, PoolConfig, RpcServer};

#[derive(FromArgs)]
/// wirebench - compare a binary RPC server with an HTTP/JSON server
struct Cli {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    RpcServer(RpcServerArgs),
    HttpServer(HttpServerArgs),
    Bench(BenchArgs),
}

// Calls run on a pool of `workers` blocking threads; callers beyond that
// wait for a free worker.
#[derive(FromArgs)]
#[argh(subcommand, name = "rpc-server")]
/// start the binary RPC server
struct RpcServerArgs {
    /// address to bind the RPC listener to
    #[argh(option, short = 'b', default = "config::DEFAULT_RPC_BIND.into()")]
    bind: String,

    /// number of concurrent workers (at least 1)
    #[argh(option, short = 'w', default = "wirebench_server::DEFAULT_WORKERS")]
    workers: usize,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "http-server")]
/// start the HTTP/JSON server
struct HttpServerArgs {
    /// address to bind the HTTP listener to
    #[argh(option, short = 'b', default = "config::DEFAULT_HTTP_BIND.into()")]
    bind: String,
}

// Targets fall back to WIREBENCH_RPC_ADDR / WIREBENCH_HTTP_URL, then to
// the local defaults.
#[derive(FromArgs)]
#[argh(subcommand, name = "bench")]
/// benchmark both servers and print the latency report
struct BenchArgs {
    /// binary RPC server address (host:port)
    #[argh(option, long = "rpc")]
    rpc: Option<String>,

    /// base URL of the HTTP server, including http:// or https://
    #[argh(option, long = "http")]
    http: Option<String>,

    /// calls per operation and protocol (at least 1)
    #[argh(option, short = 'r', default = "wirebench_client::DEFAULT_RUNS")]
    runs: usize,

    /// seconds to wait before the first call, e.g. while servers boot
    #[argh(option, long = "startup-delay-secs", default = "0")]
    startup_delay_secs: u64,

    /// comma-separated input numbers (default 5,1,9,3,7)
    #[argh(option, long = "numbers")]
    numbers: Option<String>,

    /// input text for the word count
    #[argh(option, long = "text", default = "DEFAULT_TEXT.into()")]
    text: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Set default log level to INFO, but allow RUST_LOG env var to override
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if matches!(cli.command, Commands::Bench(_)) {
        // stdout carries the report
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    match cli.command {
        Commands::RpcServer(args) => {
            let workers = config::validate_positive(args.workers, "workers")?;
            tracing::info!("Starting binary RPC server on {} with {} workers", args.bind, workers);

            let server = RpcServer::bind(&args.bind, PoolConfig::with_workers(workers)).await?;
            server.run().await?;
            Ok(())
        }
        Commands::HttpServer(args) => {
            tracing::info!("Starting HTTP server on {}", args.bind);

            let server = HttpServer::bind(&args.bind).await?;
            server.run().await?;
            Ok(())
        }
        Commands::Bench(args) => run_bench(args).await,
    }
}

async fn run_bench(args: BenchArgs) -> Result<()> {
    let rpc_addr = config::resolve_from_env(args.rpc, RPC_ADDR_ENV, DEFAULT_RPC_TARGET);
    let http_url = config::resolve_from_env(args.http, HTTP_URL_ENV, DEFAULT_HTTP_TARGET);
    config::validate_http_url(&http_url, "HTTP server URL")?;

    let runs = config::validate_positive(args.runs, "runs")?;
    let mut bench_config = BenchmarkConfig::default().with_runs(runs).with_text(args.text);
    if let Some(numbers) = &args.numbers {
        bench_config = bench_config.with_numbers(config::parse_numbers(numbers)?);
    }

    if args.startup_delay_secs > 0 {
        tracing::info!("Waiting {}s for servers to be ready...", args.startup_delay_secs);
        tokio::time::sleep(Duration::from_secs(args.startup_delay_secs)).await;
    }

    tracing::info!("Benchmarking RPC at {} and HTTP at {} ({} runs)", rpc_addr, http_url, runs);

    let harness = Harness::new(bench_config);
    let results = harness
        .run(&rpc_addr, &http_url, &mut std::io::stdout())
        .await?;

    let failed = results.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        tracing::warn!("{} of {} protocols failed", failed, results.len());
    }

    Ok(())
}

/// CLI argument parsing tests.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_rpc_server_defaults() {
        let args: Cli = Cli::from_args(&["wirebench"], &["rpc-server"]).unwrap();
        match args.command {
            Commands::RpcServer(RpcServerArgs { bind, workers }) => {
                assert_eq!(bind, "0.0.0.0:50051");
                assert_eq!(workers, 10);
            }
            _ => panic!("Expected RpcServer command"),
        }
    }

    #[test]
    fn test_cli_parse_rpc_server_custom() {
        let args: Cli = Cli::from_args(&["wirebench"], &["rpc-server", "-b", "127.0.0.1:6000", "-w", "4"]).unwrap();
        match args.command {
            Commands::RpcServer(RpcServerArgs { bind, workers }) => {
                assert_eq!(bind, "127.0.0.1:6000");
                assert_eq!(workers, 4);
            }
            _ => panic!("Expected RpcServer command"),
        }
    }

    #[test]
    fn test_cli_parse_http_server() {
        let args: Cli = Cli::from_args(&["wirebench"], &["http-server"]).unwrap();
        match args.command {
            Commands::HttpServer(HttpServerArgs { bind }) => assert_eq!(bind, "0.0.0.0:5000"),
            _ => panic!("Expected HttpServer command"),
        }

        let args: Cli = Cli::from_args(&["wirebench"], &["http-server", "--bind", "127.0.0.1:8080"]).unwrap();
        match args.command {
            Commands::HttpServer(HttpServerArgs { bind }) => assert_eq!(bind, "127.0.0.1:8080"),
            _ => panic!("Expected HttpServer command"),
        }
    }

    #[test]
    fn test_cli_parse_bench_defaults() {
        let args: Cli = Cli::from_args(&["wirebench"], &["bench"]).unwrap();
        match args.command {
            Commands::Bench(BenchArgs { rpc, http, runs, startup_delay_secs, numbers, text }) => {
                assert!(rpc.is_none());
                assert!(http.is_none());
                assert_eq!(runs, 5);
                assert_eq!(startup_delay_secs, 0);
                assert!(numbers.is_none());
                assert_eq!(text, "hello world this is a test hello world");
            }
            _ => panic!("Expected Bench command"),
        }
    }

    #[test]
    fn test_cli_parse_bench_all_options() {
        let args: Cli = Cli::from_args(&["wirebench"], &[
            "bench",
            "--rpc", "rpc-server:50051",
            "--http", "http://rest-server:5000",
            "-r", "20",
            "--startup-delay-secs", "5",
            "--numbers", "2,4,6",
            "--text", "a b a",
        ]).unwrap();
        match args.command {
            Commands::Bench(BenchArgs { rpc, http, runs, startup_delay_secs, numbers, text }) => {
                assert_eq!(rpc, Some("rpc-server:50051".to_string()));
                assert_eq!(http, Some("http://rest-server:5000".to_string()));
                assert_eq!(runs, 20);
                assert_eq!(startup_delay_secs, 5);
                assert_eq!(numbers, Some("2,4,6".to_string()));
                assert_eq!(text, "a b a");
            }
            _ => panic!("Expected Bench command"),
        }
    }

    #[test]
    fn test_cli_rejects_non_numeric_workers() {
        assert!(Cli::from_args(&["wirebench"], &["rpc-server", "-w", "many"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::from_args(&["wirebench"], &[]).is_err());
    }
}
