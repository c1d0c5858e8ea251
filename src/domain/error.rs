// src/domain/error.rs
use serde_json::Value;
use thiserror::Error;

/// Failure of a single REST call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("session is no longer valid"))]
    Unauthorized { message: Option<String> },
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response, pulling the server's message out of the body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Http { status, message }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Http { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

/// `message` first, then the `detail` field, then the raw text.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => ["message", "detail"]
            .iter()
            .find_map(|key| json.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage file is corrupt: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("No route matches path: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Invalid login response: {0}")]
    InvalidLoginResponse(String),
}

impl DomainError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DomainError::Api(ApiError::Unauthorized { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_json_message_when_building_error_then_uses_message_field() {
        let err = ApiError::from_status(400, r#"{"message": "code expired", "detail": "x"}"#);

        assert_eq!(
            err,
            ApiError::Http {
                status: 400,
                message: Some("code expired".to_string())
            }
        );
    }

    #[test]
    fn given_drf_detail_when_building_error_then_falls_back_to_detail() {
        let err = ApiError::from_status(404, r#"{"detail": "Not found."}"#);

        assert_eq!(err.server_message(), Some("Not found."));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn given_plain_text_body_when_building_error_then_uses_text() {
        let err = ApiError::from_status(502, "Bad Gateway\n");

        assert_eq!(err.server_message(), Some("Bad Gateway"));
    }

    #[test]
    fn given_401_when_building_error_then_returns_unauthorized() {
        let err = ApiError::from_status(401, "");

        assert!(matches!(err, ApiError::Unauthorized { message: None }));
        assert_eq!(err.to_string(), "Unauthorized: session is no longer valid");
    }

    #[test]
    fn given_json_without_known_fields_when_building_error_then_has_no_message() {
        let err = ApiError::from_status(400, r#"{"content": ["This field is required."]}"#);

        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "HTTP 400: request failed");
    }
}
