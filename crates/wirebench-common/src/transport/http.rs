//! HTTP Transport Utilities
//!
//! Helpers shared by the HTTP/JSON server and client:
//! - Parsing typed JSON bodies
//! - Building JSON responses and error responses
//! - Type aliases for Hyper request/response types

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::protocol::error::{Result, WirebenchError};
use crate::protocol::ErrorBody;

/// Type alias for Hyper incoming requests
pub type HyperRequest = Request<Incoming>;

/// Type alias for Hyper responses with full body
pub type HyperResponse = Response<Full<Bytes>>;

pub const APPLICATION_JSON: &str = "application/json";

/// HTTP transport utility functions
pub struct HttpTransport;

impl HttpTransport {
    /// Parse a typed JSON body.
    ///
    /// Missing fields, wrong-typed fields and malformed JSON all map to
    /// [`WirebenchError::InvalidRequest`].
    ///
    /// # Example
    ///
    /// ```
    /// use wirebench_common::transport::http::HttpTransport;
    /// use wirebench_common::protocol::NumberList;
    /// use hyper::body::Bytes;
    ///
    /// let body = Bytes::from(r#"{"numbers":[5,1,9]}"#);
    /// let list: NumberList = HttpTransport::parse_json(&body).unwrap();
    /// assert_eq!(list.numbers, vec![5, 1, 9]);
    /// ```
    pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| WirebenchError::InvalidRequest(e.to_string()))
    }

    /// Create a JSON HTTP response with the given status.
    pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> HyperResponse {
        match serde_json::to_vec(value) {
            Ok(body) => Self::with_body(status, body),
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize response")
            }
        }
    }

    /// Create an error response carrying `{"error": message}`.
    pub fn error_response(status: StatusCode, message: impl Into<String>) -> HyperResponse {
        let body = ErrorBody {
            error: message.into(),
        };
        // ErrorBody is a single string field; serializing it cannot fail
        let bytes = serde_json::to_vec(&body).unwrap_or_default();
        Self::with_body(status, bytes)
    }

    fn with_body(status: StatusCode, body: Vec<u8>) -> HyperResponse {
        let mut response = Response::new(Full::new(Bytes::from(body)));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        response
    }

    /// Extract the message from an error body, falling back to the raw text.
    pub fn error_message(body: &[u8]) -> String {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(err) => err.error,
            Err(_) => String::from_utf8_lossy(body).into_owned(),
        }
    }
}
