// src/application/store.rs
use crate::constants::{TOKEN_KEY, USER_KEY};
use crate::domain::session::empty_user;
use crate::domain::{AuthStatus, SessionState, StorageError};
use crate::ports::Storage;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// State transitions of the session. Only `SetUser` touches storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AuthRequest,
    AuthSuccess { token: String, user: Value },
    AuthError(String),
    Logout,
    SetUser(Value),
    ClearError,
}

/// Global store: session state plus the persistent storage it is mirrored to.
pub struct SessionStore {
    state: Mutex<SessionState>,
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Rebuild the session from whatever was persisted by a previous run.
    pub fn restore(storage: Arc<dyn Storage>) -> Self {
        let token = storage
            .get_item(TOKEN_KEY)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Could not read stored token");
                None
            })
            .unwrap_or_default();

        let user = match storage.get_item(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(user) if user.is_object() => user,
                Ok(_) => {
                    warn!("Stored user is not a JSON object, ignoring it");
                    empty_user()
                }
                Err(e) => {
                    warn!(error = %e, "Stored user is not valid JSON, ignoring it");
                    empty_user()
                }
            },
            Ok(None) => empty_user(),
            Err(e) => {
                warn!(error = %e, "Could not read stored user");
                empty_user()
            }
        };

        debug!(authenticated = !token.is_empty(), "Restored session");
        Self {
            state: Mutex::new(SessionState::new(token, user)),
            storage,
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // A panic mid-mutation leaves plain data behind, still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn commit(&self, mutation: Mutation) -> Result<(), StorageError> {
        debug!(mutation = mutation_name(&mutation), "Committing");
        if let Mutation::SetUser(user) = &mutation {
            self.storage.set_item(USER_KEY, &serde_json::to_string(user)?)?;
        }
        apply(&mut self.lock(), mutation);
        Ok(())
    }

    /// Reset the session and drop both persisted keys. Never fails.
    pub fn logout(&self) {
        apply(&mut self.lock(), Mutation::Logout);
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!(key, error = %e, "Failed to remove stored session key");
            }
        }
    }

    pub fn clear_error(&self) {
        apply(&mut self.lock(), Mutation::ClearError);
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Current token, `None` when logged out.
    pub fn token(&self) -> Option<String> {
        let state = self.lock();
        (!state.token.is_empty()).then(|| state.token.clone())
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.lock().status
    }

    pub fn user(&self) -> Value {
        self.lock().user.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }
}

pub fn apply(state: &mut SessionState, mutation: Mutation) {
    match mutation {
        Mutation::AuthRequest => {
            state.status = AuthStatus::Loading;
            state.error = None;
        }
        Mutation::AuthSuccess { token, user } => {
            state.status = AuthStatus::Success;
            state.token = token;
            state.user = user;
            state.error = None;
        }
        Mutation::AuthError(error) => {
            state.status = AuthStatus::Error;
            state.error = Some(error);
        }
        Mutation::Logout => {
            state.status = AuthStatus::Idle;
            state.token = String::new();
            state.user = empty_user();
            state.error = None;
        }
        Mutation::SetUser(user) => state.user = user,
        Mutation::ClearError => state.error = None,
    }
}

fn mutation_name(mutation: &Mutation) -> &'static str {
    match mutation {
        Mutation::AuthRequest => "auth_request",
        Mutation::AuthSuccess { .. } => "auth_success",
        Mutation::AuthError(_) => "auth_error",
        Mutation::Logout => "logout",
        Mutation::SetUser(_) => "set_user",
        Mutation::ClearError => "clear_error",
    }
}
