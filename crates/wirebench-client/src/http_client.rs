//! HTTP/JSON client
//!
//! POSTs JSON bodies to the five operation routes through a pooled hyper
//! client, so consecutive calls reuse one keep-alive connection. Non-2xx
//! responses become [`WirebenchError::Http`] carrying the server's
//! `{"error": ...}` message.

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use wirebench_common::protocol::error::{Result, WirebenchError};
use wirebench_common::protocol::{
    MinMaxResponse, Number, NumberList, SortedResponse, Text, WordCountResponse,
};
use wirebench_common::transport::http::APPLICATION_JSON;
use wirebench_common::transport::HttpTransport;

use crate::comparator::{Comparator, Protocol};

pub struct HttpClient {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// No connection is made until the first call.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        base_url
            .parse::<Uri>()
            .map_err(|e| WirebenchError::InvalidRequest(format!("Invalid URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url,
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout: None,
        })
    }

    /// Bounds each request (connect, send and full body). Unbounded by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` as JSON to `path` and decodes a 2xx response as `R`.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let payload = serde_json::to_vec(body)?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(&url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(Full::new(Bytes::from(payload)))
            .map_err(|e| WirebenchError::InvalidRequest(format!("Failed to build request: {}", e)))?;

        let (status, bytes) = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.send(request))
                .await
                .map_err(|_| WirebenchError::Timeout(timeout.as_millis() as u64))??,
            None => self.send(request).await?,
        };

        if !status.is_success() {
            return Err(WirebenchError::Http {
                status: status.as_u16(),
                message: HttpTransport::error_message(&bytes),
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| WirebenchError::InvalidResponse(format!("{} returned bad JSON: {}", path, e)))
    }

    async fn send(&self, request: Request<Full<Bytes>>) -> Result<(hyper::StatusCode, Bytes)> {
        let response = self.client.request(request).await.map_err(|e| {
            if e.is_connect() {
                WirebenchError::Connection(format!("Failed to connect to {}: {}", self.base_url, e))
            } else {
                WirebenchError::Transport(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| WirebenchError::Transport(format!("Failed to read response: {}", e)))?
            .to_bytes();

        Ok((status, bytes))
    }
}

#[async_trait]
impl Comparator for HttpClient {
    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    async fn reduce(&mut self, numbers: &[i64]) -> Result<Number> {
        self.post_json("/process", &NumberList::new(numbers)).await
    }

    async fn word_count(&mut self, content: &str) -> Result<WordCountResponse> {
        self.post_json("/wordcount", &Text::new(content)).await
    }

    async fn min_max(&mut self, numbers: &[i64]) -> Result<MinMaxResponse> {
        self.post_json("/minmax", &NumberList::new(numbers)).await
    }

    async fn sort(&mut self, numbers: &[i64]) -> Result<SortedResponse> {
        self.post_json("/sort", &NumberList::new(numbers)).await
    }

    async fn primes(&mut self, numbers: &[i64]) -> Result<NumberList> {
        self.post_json("/primes", &NumberList::new(numbers)).await
    }
}
