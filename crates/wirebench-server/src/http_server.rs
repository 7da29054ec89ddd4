//! HTTP Server for wirebench
//!
//! HTTP/1.1 server built on hyper. Each accepted connection gets its own
//! tokio task; request bodies are read in full (bounded by
//! [`MAX_MESSAGE_SIZE`]) and handed to the [`HttpRouter`].
//!
//! # Example
//!
//! ```no_run
//! use wirebench_server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = HttpServer::bind("0.0.0.0:5000").await.unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

use http_body_util::{BodyExt, Limited};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::http_router::HttpRouter;
use crate::service::ComparatorService;
use wirebench_common::protocol::error::{Result, WirebenchError};
use wirebench_common::transport::{HttpTransport, HyperRequest, HyperResponse, MAX_MESSAGE_SIZE};

/// HTTP server exposing the five operation routes.
pub struct HttpServer {
    listener: TcpListener,
    router: Arc<HttpRouter>,
}

impl HttpServer {
    /// Binds the listener. Use port 0 to let the OS pick one.
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| WirebenchError::Connection(format!("Failed to bind to {}: {}", addr, e)))?;

        Ok(Self {
            listener,
            router: Arc::new(HttpRouter::new(ComparatorService::new())),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| WirebenchError::Connection(format!("Failed to get local address: {}", e)))
    }

    /// Serves connections until accepting fails.
    pub async fn run(self) -> Result<()> {
        tracing::info!("HTTP server listening on {}", self.local_addr()?);

        loop {
            let (stream, peer_addr) = self
                .listener
                .accept()
                .await
                .map_err(|e| WirebenchError::Connection(format!("Failed to accept connection: {}", e)))?;

            let io = TokioIo::new(stream);
            let router = self.router.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let router = router.clone();
                    async move { Ok::<_, Infallible>(Self::handle_request(router, req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::warn!("Error serving connection from {}: {}", peer_addr, err);
                }
            });
        }
    }

    /// Reads the body and routes the request.
    async fn handle_request(router: Arc<HttpRouter>, req: HyperRequest) -> HyperResponse {
        let (parts, body) = req.into_parts();
        tracing::debug!("{} {}", parts.method, parts.uri.path());

        let body = match Limited::new(body, MAX_MESSAGE_SIZE).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                tracing::warn!("Failed to read request body: {}", e);
                return HttpTransport::error_response(
                    StatusCode::BAD_REQUEST,
                    format!("failed to read request body: {}", e),
                );
            }
        };

        router.handle(&parts.method, parts.uri.path(), &body).await
    }
}
