use std::future::Future;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::protocol::error::{Result, WirebenchError};
use crate::protocol::{RpcRequest, RpcResponse, Status};
use crate::transport::codec::PostcardCodec;
use crate::transport::tcp::{read_frame, write_frame};

/// Async TCP server for the binary-RPC protocol.
///
/// Accepts connections in a loop and spawns a task per connection. Each
/// connection is keep-alive: requests on it are read, handled and answered
/// one at a time until the peer closes it.
pub struct TcpServer {
    listener: TcpListener,
}

impl TcpServer {
    /// Creates a new TCP server bound to the specified address.
    ///
    /// # Arguments
    /// * `bind_addr` - The address to bind to (e.g., "0.0.0.0:50051")
    pub async fn new(bind_addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| WirebenchError::Connection(format!("Failed to bind to {}: {}", bind_addr, e)))?;

        Ok(Self { listener })
    }

    /// Gets the actual bound address.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| WirebenchError::Connection(format!("Failed to get local addr: {}", e)))
    }

    /// Runs the server with the given request handler.
    ///
    /// The handler turns every decoded request into a response; it never
    /// fails, so protocol errors travel back to the caller as a [`Status`].
    pub async fn run_with_handler<F, Fut>(&self, handler: F) -> Result<()>
    where
        F: Fn(RpcRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RpcResponse> + Send + 'static,
    {
        let handler = Arc::new(handler);

        loop {
            let (stream, peer_addr) = self
                .listener
                .accept()
                .await
                .map_err(|e| WirebenchError::Connection(format!("Failed to accept connection: {}", e)))?;

            tracing::debug!("Connection established from {}", peer_addr);

            let handler = handler.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, handler).await {
                    tracing::warn!("Connection from {} failed: {}", peer_addr, e);
                }
            });
        }
    }
}

/// Handle a single TCP connection
///
/// Processes requests until the connection is closed.
async fn handle_connection<F, Fut>(mut stream: TcpStream, handler: Arc<F>) -> Result<()>
where
    F: Fn(RpcRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RpcResponse> + Send + 'static,
{
    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("Failed to set TCP_NODELAY: {}", e);
    }

    loop {
        let Some(buf) = read_frame(&mut stream).await? else {
            tracing::debug!("Connection closed by peer");
            return Ok(());
        };

        let response = match PostcardCodec::decode_request(&buf) {
            Ok(request) => handler(request).await,
            Err(e) => {
                tracing::warn!("Failed to decode request: {}", e);
                RpcResponse::error(0, Status::invalid_argument(format!("malformed request: {}", e)))
            }
        };

        let encoded = PostcardCodec::encode_response(&response)?;
        write_frame(&mut stream, &encoded).await?;
    }
}
