// src/domain/session.rs
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Progress of the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    #[default]
    #[serde(rename = "")]
    Idle,
    Loading,
    Success,
    Error,
}

impl AuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStatus::Idle => "",
            AuthStatus::Loading => "loading",
            AuthStatus::Success => "success",
            AuthStatus::Error => "error",
        }
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global client state. An empty token means nobody is logged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub token: String,
    pub user: Value,
    pub status: AuthStatus,
    pub error: Option<String>,
}

impl SessionState {
    pub fn new(token: String, user: Value) -> Self {
        Self {
            token,
            user,
            status: AuthStatus::Idle,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(String::new(), empty_user())
    }
}

pub fn empty_user() -> Value {
    Value::Object(Map::new())
}
