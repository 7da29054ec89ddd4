use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};

use crate::protocol::error::{Result, WirebenchError};
use crate::protocol::{RpcRequest, RpcResponse};
use crate::transport::codec::PostcardCodec;

/// Default timeout for establishing a TCP connection (5 seconds)
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest frame either side accepts (16 MiB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Async TCP transport for the binary-RPC protocol.
///
/// # Wire Protocol
///
/// Every message is a frame: a 4-byte length prefix (big-endian u32)
/// followed by the postcard-encoded envelope:
///
/// ```text
/// [4-byte length] [postcard data]
/// ```
///
/// A connection carries any number of request/response pairs, one at a
/// time, until either side closes it.
///
/// # Example
///
/// ```no_run
/// use wirebench_common::transport::TcpTransport;
/// use wirebench_common::protocol::{Call, NumberList, RpcRequest};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = TcpTransport::new();
/// let mut stream = transport.connect("127.0.0.1:50051").await?;
///
/// let request = RpcRequest::new(Call::Reduce(NumberList::new([5, 1, 9, 3, 7])));
/// let response = transport.send_request(&mut stream, &request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TcpTransport {
    connect_timeout: Duration,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connects to a remote endpoint.
    ///
    /// The address may resolve to several socket addresses; each is tried in
    /// turn until one accepts the connection.
    pub async fn connect(&self, addr: &str) -> Result<TcpStream> {
        let socket_addrs = lookup_host(addr)
            .await
            .map_err(|e| WirebenchError::Connection(format!("Invalid address '{}': {}", addr, e)))?;

        let mut last_err = None;
        for socket_addr in socket_addrs {
            match tokio::time::timeout(self.connect_timeout, TcpStream::connect(socket_addr)).await {
                Ok(Ok(stream)) => {
                    stream
                        .set_nodelay(true)
                        .map_err(|e| WirebenchError::Connection(format!("Failed to set TCP_NODELAY: {}", e)))?;
                    return Ok(stream);
                }
                Ok(Err(e)) => last_err = Some(e.to_string()),
                Err(_) => {
                    last_err = Some(format!(
                        "timed out after {}ms",
                        self.connect_timeout.as_millis()
                    ))
                }
            }
        }

        Err(WirebenchError::Connection(format!(
            "Failed to connect to {}: {}",
            addr,
            last_err.unwrap_or_else(|| "no addresses resolved".to_string())
        )))
    }

    /// Sends a request and waits for its response.
    pub async fn send_request(&self, stream: &mut TcpStream, request: &RpcRequest) -> Result<RpcResponse> {
        let encoded = PostcardCodec::encode_request(request)?;
        write_frame(stream, &encoded).await?;

        let data = read_frame(stream)
            .await?
            .ok_or_else(|| WirebenchError::Connection("Connection closed by server".to_string()))?;

        PostcardCodec::decode_response(&data)
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes one length-prefixed frame and flushes it.
pub async fn write_frame<W>(writer: &mut W, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(WirebenchError::InvalidRequest(format!(
            "Message too large: {} bytes (max {} bytes)",
            data.len(),
            MAX_MESSAGE_SIZE
        )));
    }
    let len = data.len() as u32;

    writer
        .write_all(&len.to_be_bytes())
        .await
        .map_err(|e| map_io_error(e, "writing length prefix"))?;
    writer
        .write_all(data)
        .await
        .map_err(|e| map_io_error(e, "writing data"))?;
    writer
        .flush()
        .await
        .map_err(|e| map_io_error(e, "flushing stream"))?;

    Ok(())
}

/// Reads one length-prefixed frame.
///
/// Returns `Ok(None)` when the peer closed the connection cleanly before
/// sending another length prefix. A close partway through the prefix is a
/// [`WirebenchError::Connection`].
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        let n = reader
            .read(&mut len_buf[filled..])
            .await
            .map_err(|e| map_io_error(e, "reading length prefix"))?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(WirebenchError::Connection(format!(
                "Connection closed after {} of 4 length prefix bytes",
                filled
            )));
        }
        filled += n;
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(WirebenchError::InvalidResponse(format!(
            "Message too large: {} bytes (max {} bytes)",
            len, MAX_MESSAGE_SIZE
        )));
    }

    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .await
        .map_err(|e| map_io_error(e, "reading data"))?;

    Ok(Some(buf))
}

/// Map IO errors to appropriate WirebenchError variants
///
/// - Timeouts/would block -> `Timeout`
/// - Connection errors -> `Connection`
/// - Other IO errors -> `Io`
fn map_io_error(err: std::io::Error, context: &str) -> WirebenchError {
    match err.kind() {
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
            WirebenchError::Timeout(DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)
        }
        std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::ConnectionAborted
        | std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::NotConnected => {
            WirebenchError::Connection(format!("{}: Connection lost", context))
        }
        _ => WirebenchError::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frame_round_trip_over_duplex() {
        let (mut client, mut server) = tokio::io::duplex(64);

        let writer = tokio::spawn(async move {
            write_frame(&mut client, b"first").await.unwrap();
            write_frame(&mut client, b"").await.unwrap();
        });

        assert_eq!(read_frame(&mut server).await.unwrap(), Some(b"first".to_vec()));
        assert_eq!(read_frame(&mut server).await.unwrap(), Some(Vec::new()));
        writer.await.unwrap();

        // writer half dropped: clean EOF
        assert_eq!(read_frame(&mut server).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_oversize_length_prefix_is_rejected() {
        let (mut client, mut server) = tokio::io::duplex(64);
        let len = (MAX_MESSAGE_SIZE as u32) + 1;
        client.write_all(&len.to_be_bytes()).await.unwrap();

        let result = read_frame(&mut server).await;
        assert!(matches!(result, Err(WirebenchError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_truncated_frame_is_connection_error() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&10u32.to_be_bytes()).await.unwrap();
        client.write_all(b"abc").await.unwrap();
        drop(client);

        let result = read_frame(&mut server).await;
        assert!(matches!(result, Err(WirebenchError::Connection(_))));
    }

    #[tokio::test]
    async fn test_partial_length_prefix_is_connection_error() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&[0, 0]).await.unwrap();
        drop(client);

        let result = read_frame(&mut server).await;
        match result {
            Err(WirebenchError::Connection(msg)) => assert!(msg.contains("2 of 4")),
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Bind and drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = TcpTransport::new().connect(&addr.to_string()).await;
        assert!(matches!(result, Err(WirebenchError::Connection(_))));
    }
}
