// src/application/auth.rs
use crate::application::store::{Mutation, SessionStore};
use crate::constants::{LOGIN_FAILED_MESSAGE, TOKEN_KEY, USER_KEY};
use crate::domain::session::empty_user;
use crate::domain::{ApiError, DomainError, StorageError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The user endpoints the session actions need.
pub trait UserGateway {
    fn wechat_login(&self, code: &str) -> Result<Value, ApiError>;

    fn get_profile(&self) -> Result<Value, ApiError>;

    fn update_profile(&self, profile: &Value) -> Result<Value, ApiError>;
}

/// Asynchronous-style store actions: each wraps one API call and commits the result.
pub struct AuthService<G: UserGateway> {
    gateway: G,
    session: Arc<SessionStore>,
}

impl<G: UserGateway> AuthService<G> {
    pub fn new(gateway: G, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Exchange a WeChat authorisation code for a session.
    ///
    /// Returns the full login response. On any failure the persisted session is wiped.
    #[instrument(level = "debug", skip_all)]
    pub fn login(&self, code: &str) -> Result<Value, DomainError> {
        self.session.commit(Mutation::AuthRequest)?;

        match self.try_login(code) {
            Ok(response) => {
                info!("Login succeeded");
                Ok(response)
            }
            Err(e) => {
                let message = match &e {
                    DomainError::Api(api) => api.server_message(),
                    _ => None,
                }
                .unwrap_or(LOGIN_FAILED_MESSAGE)
                .to_string();
                warn!(error = %e, "Login failed");

                self.session.commit(Mutation::AuthError(message))?;
                let storage = self.session.storage();
                for key in [TOKEN_KEY, USER_KEY] {
                    if let Err(err) = storage.remove_item(key) {
                        warn!(key, error = %err, "Could not clear stored session");
                    }
                }
                Err(e)
            }
        }
    }

    fn try_login(&self, code: &str) -> Result<Value, DomainError> {
        let response = self.gateway.wechat_login(code)?;

        let token = response
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::InvalidLoginResponse("missing token".to_string()))?
            .to_string();
        let user = response
            .get("user")
            .filter(|u| u.is_object())
            .cloned()
            .unwrap_or_else(empty_user);

        let storage = self.session.storage();
        storage.set_item(TOKEN_KEY, &token)?;
        let serialized = serde_json::to_string(&user).map_err(StorageError::from)?;
        storage.set_item(USER_KEY, &serialized)?;
        self.session.commit(Mutation::AuthSuccess { token, user })?;
        Ok(response)
    }

    pub fn logout(&self) {
        debug!("Logging out");
        self.session.logout();
    }

    pub fn fetch_user_profile(&self) -> Result<Value, DomainError> {
        let user = self.gateway.get_profile()?;
        self.session.commit(Mutation::SetUser(user.clone()))?;
        Ok(user)
    }

    pub fn update_user_profile(&self, profile: &Value) -> Result<Value, DomainError> {
        let user = self.gateway.update_profile(profile)?;
        self.session.commit(Mutation::SetUser(user.clone()))?;
        Ok(user)
    }

    pub fn clear_error(&self) {
        self.session.clear_error();
    }
}
