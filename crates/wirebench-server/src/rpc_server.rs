//! Binary-RPC server for the `Comparator` service.
//!
//! Wraps the framed [`TcpServer`] from `wirebench-common`: every decoded
//! request is dispatched to the [`ComparatorService`] on the [`WorkerPool`],
//! and the outcome travels back in an [`RpcResponse`].
//!
//! # Example
//!
//! ```no_run
//! use wirebench_server::{PoolConfig, RpcServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = RpcServer::bind("0.0.0.0:50051", PoolConfig::default()).await.unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use wirebench_common::protocol::error::Result;
use wirebench_common::protocol::{RpcRequest, RpcResponse, Status};
use wirebench_common::transport::TcpServer;

use crate::service::ComparatorService;
use crate::worker_pool::{PoolConfig, WorkerPool};

pub struct RpcServer {
    server: TcpServer,
    service: Arc<ComparatorService>,
    pool: WorkerPool,
}

impl RpcServer {
    /// Binds the listener. Use port 0 to let the OS pick one.
    pub async fn bind(addr: &str, config: PoolConfig) -> Result<Self> {
        let server = TcpServer::new(addr).await?;
        Ok(Self {
            server,
            service: Arc::new(ComparatorService::new()),
            pool: WorkerPool::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.server.local_addr()
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Serves connections until accepting fails.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            "RPC server listening on {} with {} workers",
            self.local_addr()?,
            self.pool.workers()
        );

        let service = self.service;
        let pool = self.pool;
        self.server
            .run_with_handler(move |request| {
                let service = service.clone();
                let pool = pool.clone();
                async move { dispatch(&pool, service, request).await }
            })
            .await
    }
}

/// Runs one request on the pool and wraps the outcome.
async fn dispatch(pool: &WorkerPool, service: Arc<ComparatorService>, request: RpcRequest) -> RpcResponse {
    let RpcRequest { id, call } = request;
    let method = call.method();

    let outcome = pool
        .execute(move || service.handle(call))
        .await
        .and_then(|result| result.map_err(|e| Status::invalid_argument(e.to_string())));

    match outcome {
        Ok(reply) => RpcResponse::success(id, reply),
        Err(status) => {
            tracing::debug!("{} call {} failed: {}", method, id, status);
            RpcResponse::error(id, status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebench_common::protocol::{Call, Number, NumberList, Reply, StatusCode};

    #[tokio::test]
    async fn test_bind_reports_ephemeral_port() {
        let server = RpcServer::bind("127.0.0.1:0", PoolConfig::default()).await.unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
        assert_eq!(server.workers(), 10);
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let pool = WorkerPool::new(PoolConfig::default());
        let request = RpcRequest::new(Call::Reduce(NumberList::new([5, 1, 9, 3, 7])));
        let id = request.id;

        let response = dispatch(&pool, Arc::new(ComparatorService::new()), request).await;
        assert_eq!(response, RpcResponse::success(id, Reply::Reduce(Number { value: 165 })));
    }

    #[tokio::test]
    async fn test_dispatch_operation_error_is_invalid_argument() {
        let pool = WorkerPool::new(PoolConfig::default());
        let request = RpcRequest::new(Call::MinMax(NumberList::default()));

        let response = dispatch(&pool, Arc::new(ComparatorService::new()), request).await;
        let status = response.outcome.unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);
        assert_eq!(status.message, "MinMax requires at least one number");
    }
}
