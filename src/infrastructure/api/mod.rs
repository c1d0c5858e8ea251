// src/infrastructure/api/mod.rs
//! REST client for the study service.
//!
//! Every call goes through the same two interceptors:
//! the outgoing request gets the session's bearer token, and a 401 on the way
//! back logs the session out and forces the router to `/login`.
mod analysis;
mod curriculum;
mod questions;
mod users;

pub use analysis::AnalysisApi;
pub use curriculum::CurriculumApi;
pub use questions::QuestionApi;
pub use users::UserApi;

use crate::application::SessionStore;
use crate::constants::LOGIN_PATH;
use crate::domain::ApiError;
use crate::ports::{ApiRequest, Method, Navigator, RawResponse, RequestBody, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Query parameters passed through to list endpoints.
pub type Params = [(String, String)];

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn questions(&self) -> QuestionApi<'_> {
        QuestionApi::new(self)
    }

    pub fn curriculum(&self) -> CurriculumApi<'_> {
        CurriculumApi::new(self)
    }

    pub fn analysis(&self) -> AnalysisApi<'_> {
        AnalysisApi::new(self)
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub(crate) fn get(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        self.execute(ApiRequest::new(Method::Get, path).with_query(params))
    }

    pub(crate) fn post(&self, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        self.execute(ApiRequest::new(Method::Post, path).with_body(body))
    }

    pub(crate) fn put(&self, path: &str, body: RequestBody) -> Result<Value, ApiError> {
        self.execute(ApiRequest::new(Method::Put, path).with_body(body))
    }

    pub(crate) fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(ApiRequest::new(Method::Delete, path))
    }

    pub fn execute(&self, mut request: ApiRequest) -> Result<Value, ApiError> {
        self.intercept_request(&mut request);
        debug!(method = %request.method, path = %request.path, "Sending request");
        let response = self.transport.send(&request)?;
        self.intercept_response(&request, response)
    }

    fn intercept_request(&self, request: &mut ApiRequest) {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
    }

    fn intercept_response(&self, request: &ApiRequest, response: RawResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            let error = ApiError::from_status(response.status, &response.body);
            if response.status == 401 {
                warn!(path = %request.path, "Unauthorized response, clearing session");
                self.session.logout();
                self.navigator.hard_redirect(LOGIN_PATH);
            }
            return Err(error);
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl crate::application::auth::UserGateway for ApiClient {
    fn wechat_login(&self, code: &str) -> Result<Value, ApiError> {
        self.users().wechat_login(code)
    }

    fn get_profile(&self) -> Result<Value, ApiError> {
        self.users().get_profile()
    }

    fn update_profile(&self, profile: &Value) -> Result<Value, ApiError> {
        self.users().update_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Router;
    use crate::domain::View;
    use crate::infrastructure::MemoryStorage;
    use crate::ports::Storage;
    use crate::util::testing::MockTransport;
    use serde_json::json;

    struct Fixture {
        client: ApiClient,
        transport: Arc<MockTransport>,
        storage: Arc<MemoryStorage>,
        router: Arc<Router>,
    }

    fn fixture(transport: MockTransport, items: &[(&str, &str)]) -> Fixture {
        let transport = Arc::new(transport);
        let storage = Arc::new(MemoryStorage::with_items(items));
        let session = Arc::new(SessionStore::restore(storage.clone()));
        let router = Arc::new(Router::default());
        let client = ApiClient::new(transport.clone(), session, router.clone());
        Fixture {
            client,
            transport,
            storage,
            router,
        }
    }

    #[test]
    fn given_token_when_sending_then_attaches_bearer_header() {
        let f = fixture(
            MockTransport::builder()
                .with_json(Method::Get, "/users/profile/", 200, json!({"id": 1}))
                .build(),
            &[("token", "secret")],
        );

        f.client.users().get_profile().unwrap();

        let sent = f.transport.last_request().unwrap();
        assert_eq!(sent.header("authorization"), Some("Bearer secret"));
    }

    #[test]
    fn given_no_token_when_sending_then_omits_authorization() {
        let f = fixture(
            MockTransport::builder()
                .with_json(Method::Get, "/curriculum/subjects/", 200, json!([]))
                .build(),
            &[],
        );

        f.client.curriculum().subjects().unwrap();

        assert_eq!(f.transport.last_request().unwrap().header("Authorization"), None);
    }

    #[test]
    fn given_401_from_any_endpoint_when_sending_then_clears_session_and_redirects() {
        // Arrange
        let f = fixture(
            MockTransport::builder()
                .with_status(Method::Get, "/analysis/weakness/", 401, r#"{"detail": "Token expired"}"#)
                .build(),
            &[("token", "stale"), ("user", r#"{"id":1}"#)],
        );

        // Act
        let result = f.client.analysis().weakness();

        // Assert
        assert_eq!(
            result,
            Err(ApiError::Unauthorized {
                message: Some("Token expired".to_string())
            })
        );
        assert!(f.storage.is_empty());
        assert!(!f.client.session().is_authenticated());
        assert_eq!(f.router.current().unwrap().view, View::Login);
    }

    #[test]
    fn given_server_error_when_sending_then_keeps_session() {
        let f = fixture(
            MockTransport::builder()
                .with_status(Method::Delete, "/questions/9/", 403, r#"{"message": "not yours"}"#)
                .build(),
            &[("token", "t")],
        );

        let result = f.client.questions().delete(9);

        assert_eq!(
            result,
            Err(ApiError::Http {
                status: 403,
                message: Some("not yours".to_string())
            })
        );
        assert_eq!(f.storage.get_item("token").unwrap().as_deref(), Some("t"));
        assert_eq!(f.router.current(), None);
    }

    #[test]
    fn given_empty_success_body_when_sending_then_returns_null() {
        let f = fixture(
            MockTransport::builder()
                .with_status(Method::Delete, "/questions/9/", 204, "")
                .build(),
            &[("token", "t")],
        );

        assert_eq!(f.client.questions().delete(9), Ok(Value::Null));
    }

    #[test]
    fn given_non_json_success_body_when_sending_then_returns_decode_error() {
        let f = fixture(
            MockTransport::builder()
                .with_status(Method::Get, "/analysis/progress-tracker/", 200, "<html>")
                .build(),
            &[],
        );

        let result = f.client.analysis().progress_tracker(&[]);

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn given_transport_failure_when_sending_then_propagates_without_logout() {
        let f = fixture(
            MockTransport::builder()
                .with_failure(Method::Get, "/users/profile/", "connection refused")
                .build(),
            &[("token", "t")],
        );

        let result = f.client.users().get_profile();

        assert_eq!(result, Err(ApiError::Transport("connection refused".to_string())));
        assert!(f.client.session().is_authenticated());
    }
}
