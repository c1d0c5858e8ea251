// src/util/testing.rs

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::ApiError;
use crate::ports::{ApiRequest, Method, RawResponse, Transport};

enum Reply {
    Response(RawResponse),
    Failure(String),
}

/// Scripted transport for exercising the API client without a server
///
/// Replies are keyed by method and path (query strings are ignored).
/// Unscripted requests get a 404 in the backend's error shape.
/// Every request is recorded, interceptor headers included.
///
/// # Examples
///
/// ```
/// use mistakebook::ports::Method;
/// use mistakebook::util::testing::MockTransport;
/// use serde_json::json;
///
/// let transport = MockTransport::builder()
///     .with_json(Method::Get, "/users/profile/", 200, json!({"id": 1}))
///     .with_status(Method::Get, "/analysis/weakness/", 401, "")
///     .build();
/// assert!(transport.requests().is_empty());
/// ```
pub struct MockTransport {
    replies: HashMap<(Method, String), Reply>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder::new()
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request.clone());

        match self.replies.get(&(request.method, request.path.clone())) {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Failure(message)) => Err(ApiError::Transport(message.clone())),
            None => Ok(RawResponse {
                status: 404,
                body: r#"{"detail": "Not found."}"#.to_string(),
            }),
        }
    }
}

/// Builder for MockTransport
pub struct MockTransportBuilder {
    replies: HashMap<(Method, String), Reply>,
}

impl MockTransportBuilder {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
        }
    }

    /// Answer `method path` with a JSON body
    pub fn with_json(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.with_status(method, path, status, &body.to_string())
    }

    /// Answer `method path` with a raw body
    pub fn with_status(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.replies.insert(
            (method, path.to_string()),
            Reply::Response(RawResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    /// Fail `method path` before any response arrives
    pub fn with_failure(mut self, method: Method, path: &str, message: &str) -> Self {
        self.replies
            .insert((method, path.to_string()), Reply::Failure(message.to_string()));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            replies: self.replies,
            requests: Mutex::new(vec![]),
        }
    }
}

impl Default for MockTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["reqwest", "hyper", "mio", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_scripted_json_when_sending_then_returns_it() {
        let mock = MockTransport::builder()
            .with_json(Method::Get, "/curriculum/grades/", 200, json!([{"id": 1}]))
            .build();

        let response = mock
            .send(&ApiRequest::new(Method::Get, "/curriculum/grades/"))
            .expect("Scripted reply should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"[{"id":1}]"#);
    }

    #[test]
    fn given_same_path_other_method_when_sending_then_returns_not_found() {
        let mock = MockTransport::builder()
            .with_json(Method::Get, "/questions/", 200, json!([]))
            .build();

        let response = mock
            .send(&ApiRequest::new(Method::Post, "/questions/"))
            .expect("Unscripted reply is still a response");

        assert_eq!(response.status, 404);
    }

    #[test]
    fn given_failure_configured_when_sending_then_returns_transport_error() {
        let mock = MockTransport::builder()
            .with_failure(Method::Get, "/users/profile/", "timeout")
            .build();

        let result = mock.send(&ApiRequest::new(Method::Get, "/users/profile/"));

        assert!(matches!(result, Err(ApiError::Transport(m)) if m == "timeout"));
    }

    #[test]
    fn given_several_requests_when_sending_then_records_in_order() {
        let mock = MockTransport::builder().build();

        let _ = mock.send(&ApiRequest::new(Method::Get, "/a/"));
        let _ = mock.send(&ApiRequest::new(Method::Delete, "/b/"));

        let paths: Vec<_> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a/", "/b/"]);
        assert_eq!(mock.last_request().unwrap().method, Method::Delete);
    }
}
