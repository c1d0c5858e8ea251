// src/infrastructure/http.rs
use crate::domain::ApiError;
use crate::ports::{ApiRequest, FormPart, Method, RawResponse, RequestBody, Transport};
use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, instrument};

/// Blocking HTTP transport with the client-wide defaults baked in.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        debug!(base_url, ?timeout, "Created HTTP transport");
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build(&self, request: &ApiRequest) -> Result<RequestBuilder, ApiError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        Ok(match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        })
    }
}

fn multipart_form(parts: &[FormPart]) -> Result<multipart::Form, ApiError> {
    parts.iter().try_fold(multipart::Form::new(), |form, part| match part {
        FormPart::Text { name, value } => Ok(form.text(name.clone(), value.clone())),
        FormPart::File { name, path } => form.file(name.clone(), path).map_err(|e| {
            ApiError::Transport(format!("Cannot attach {}: {}", path.display(), e))
        }),
    })
}

impl Transport for ReqwestTransport {
    #[instrument(level = "debug", skip(self, request), fields(method = %request.method, path = %request.path))]
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let response = self.build(request)?.send().map_err(|e| {
            if e.is_timeout() {
                ApiError::Transport(format!("request timed out: {e}"))
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_slashes_on_both_sides_when_joining_url_then_keeps_single_slash() {
        let transport =
            ReqwestTransport::new("http://localhost:8000/api/", Duration::from_secs(1)).unwrap();

        assert_eq!(transport.base_url(), "http://localhost:8000/api");
        assert_eq!(
            transport.url("/questions/3/"),
            "http://localhost:8000/api/questions/3/"
        );
    }

    #[test]
    fn given_missing_image_when_building_form_then_returns_transport_error() {
        let parts = vec![FormPart::File {
            name: "image".to_string(),
            path: "/definitely/not/here.png".into(),
        }];

        let result = multipart_form(&parts);

        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[test]
    fn given_unreachable_server_when_sending_then_returns_transport_error() {
        // Arrange: grab a free port, then release it so nothing is listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let transport = ReqwestTransport::new(
            &format!("http://127.0.0.1:{port}"),
            Duration::from_millis(500),
        )
        .unwrap();

        let result = transport.send(&ApiRequest::new(Method::Get, "/users/profile/"));

        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
