//! HTTP Router for the wirebench HTTP/JSON server
//!
//! Maps the five POST routes onto [`ComparatorService`] calls:
//!
//! | Route | Body | Call |
//! |---|---|---|
//! | `/process` | `{numbers}` | `Reduce` |
//! | `/wordcount` | `{content}` | `WordCount` |
//! | `/minmax` | `{numbers}` | `MinMax` |
//! | `/sort` | `{numbers}` | `Sort` |
//! | `/primes` | `{numbers}` | `Primes` |
//!
//! Status codes:
//! - `400` malformed JSON, missing or wrong-typed field (nothing computed)
//! - `404` unknown path
//! - `405` known path, method other than POST
//! - `422` the operation rejected its input (e.g. empty `/minmax`)

use hyper::header::{HeaderValue, ALLOW};
use hyper::{Method, StatusCode};
use wirebench_common::protocol::{Call, NumberList, Reply, Text};
use wirebench_common::transport::{HttpTransport, HyperResponse};

use crate::service::ComparatorService;

/// One of the five operation routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Process,
    WordCount,
    MinMax,
    Sort,
    Primes,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Process,
        Route::WordCount,
        Route::MinMax,
        Route::Sort,
        Route::Primes,
    ];

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/process" => Some(Route::Process),
            "/wordcount" => Some(Route::WordCount),
            "/minmax" => Some(Route::MinMax),
            "/sort" => Some(Route::Sort),
            "/primes" => Some(Route::Primes),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Process => "/process",
            Route::WordCount => "/wordcount",
            Route::MinMax => "/minmax",
            Route::Sort => "/sort",
            Route::Primes => "/primes",
        }
    }

    /// Parses the JSON body into the call this route serves.
    fn parse_call(&self, body: &[u8]) -> wirebench_common::Result<Call> {
        let call = match self {
            Route::Process => Call::Reduce(HttpTransport::parse_json::<NumberList>(body)?),
            Route::WordCount => Call::WordCount(HttpTransport::parse_json::<Text>(body)?),
            Route::MinMax => Call::MinMax(HttpTransport::parse_json::<NumberList>(body)?),
            Route::Sort => Call::Sort(HttpTransport::parse_json::<NumberList>(body)?),
            Route::Primes => Call::Primes(HttpTransport::parse_json::<NumberList>(body)?),
        };
        Ok(call)
    }
}

/// HTTP router for the operation routes.
pub struct HttpRouter {
    service: ComparatorService,
}

impl HttpRouter {
    pub fn new(service: ComparatorService) -> Self {
        Self { service }
    }

    /// Handles one request whose body has already been read.
    ///
    /// The operation itself runs on the blocking pool so a large body does
    /// not stall the connection tasks sharing this runtime thread.
    pub async fn handle(&self, method: &Method, path: &str, body: &[u8]) -> HyperResponse {
        let Some(route) = Route::from_path(path) else {
            return HttpTransport::error_response(
                StatusCode::NOT_FOUND,
                format!("no route for {}", path),
            );
        };

        if *method != Method::POST {
            let mut response = HttpTransport::error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("{} only accepts POST", route.path()),
            );
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("POST"));
            return response;
        }

        let call = match route.parse_call(body) {
            Ok(call) => call,
            Err(e) => {
                tracing::debug!("Rejected {} body: {}", route.path(), e);
                return HttpTransport::error_response(StatusCode::BAD_REQUEST, e.to_string());
            }
        };

        let service = self.service;
        match tokio::task::spawn_blocking(move || service.handle(call)).await {
            Ok(Ok(reply)) => reply_response(reply),
            Ok(Err(e)) => HttpTransport::error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            Err(e) => {
                tracing::error!("{} handler failed: {}", route.path(), e);
                HttpTransport::error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}

fn reply_response(reply: Reply) -> HyperResponse {
    match reply {
        Reply::Reduce(body) => HttpTransport::json_response(StatusCode::OK, &body),
        Reply::WordCount(body) => HttpTransport::json_response(StatusCode::OK, &body),
        Reply::MinMax(body) => HttpTransport::json_response(StatusCode::OK, &body),
        Reply::Sort(body) => HttpTransport::json_response(StatusCode::OK, &body),
        Reply::Primes(body) => HttpTransport::json_response(StatusCode::OK, &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    fn router() -> HttpRouter {
        HttpRouter::new(ComparatorService::new())
    }

    async fn call(method: Method, path: &str, body: Value) -> (StatusCode, Value) {
        let bytes = serde_json::to_vec(&body).unwrap();
        let response = router().handle(&method, path, &bytes).await;
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_route_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/"), None);
        assert_eq!(Route::from_path("/process/"), None);
    }

    #[tokio::test]
    async fn test_process() {
        let (status, body) = call(Method::POST, "/process", json!({"numbers": [5, 1, 9, 3, 7]})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"value": 165}));
    }

    #[tokio::test]
    async fn test_wordcount() {
        let (status, body) = call(
            Method::POST,
            "/wordcount",
            json!({"content": "hello world this is a test hello world"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"counts": {"hello": 2, "world": 2, "this": 1, "is": 1, "a": 1, "test": 1}})
        );
    }

    #[tokio::test]
    async fn test_minmax_sort_primes() {
        let input = json!({"numbers": [5, 1, 9, 3, 7]});

        let (_, body) = call(Method::POST, "/minmax", input.clone()).await;
        assert_eq!(body, json!({"min": 1, "max": 9}));

        let (_, body) = call(Method::POST, "/sort", input.clone()).await;
        assert_eq!(body, json!({"ascending": [1, 3, 5, 7, 9], "descending": [9, 7, 5, 3, 1]}));

        let (_, body) = call(Method::POST, "/primes", input).await;
        assert_eq!(body, json!({"numbers": [5, 3, 7]}));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let (status, body) = call(Method::POST, "/sort", json!({"content": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("numbers"));
    }

    #[tokio::test]
    async fn test_wrong_type_is_bad_request() {
        let (status, _) = call(Method::POST, "/wordcount", json!({"content": [1, 2]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = router().handle(&Method::POST, "/primes", b"{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_minmax_is_unprocessable() {
        let (status, body) = call(Method::POST, "/minmax", json!({"numbers": []})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"error": "MinMax requires at least one number"}));
    }

    #[tokio::test]
    async fn test_empty_inputs_that_are_allowed() {
        let (status, body) = call(Method::POST, "/process", json!({"numbers": []})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"value": 0}));

        let (status, body) = call(Method::POST, "/wordcount", json!({"content": ""})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"counts": {}}));
    }

    #[tokio::test]
    async fn test_unknown_path_and_wrong_method() {
        let (status, _) = call(Method::POST, "/nope", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let response = router().handle(&Method::GET, "/process", b"").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(ALLOW).unwrap(), "POST");
    }

    #[tokio::test]
    async fn test_operation_runs_off_the_runtime_thread() {
        let router = std::sync::Arc::new(router());
        // ~31k trial divisions per element
        let heavy_body = serde_json::to_vec(&json!({"numbers": vec![1_000_000_007i64; 10_000]})).unwrap();

        let heavy = {
            let router = router.clone();
            tokio::spawn(async move { router.handle(&Method::POST, "/primes", &heavy_body).await })
        };
        tokio::task::yield_now().await;

        let light = router
            .handle(&Method::POST, "/process", br#"{"numbers":[3]}"#)
            .await;
        assert_eq!(light.status(), StatusCode::OK);
        assert!(!heavy.is_finished());

        let heavy = heavy.await.unwrap();
        assert_eq!(heavy.status(), StatusCode::OK);
    }
}
