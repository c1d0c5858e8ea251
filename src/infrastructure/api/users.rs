// src/infrastructure/api/users.rs
use super::ApiClient;
use crate::domain::ApiError;
use crate::ports::RequestBody;
use serde_json::{json, Value};

pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn wechat_login(&self, code: &str) -> Result<Value, ApiError> {
        self.client
            .post("/users/wechat-login/", RequestBody::Json(json!({ "code": code })))
    }

    pub fn get_profile(&self) -> Result<Value, ApiError> {
        self.client.get("/users/profile/", &[])
    }

    pub fn update_profile(&self, profile: &Value) -> Result<Value, ApiError> {
        self.client
            .put("/users/profile/", RequestBody::Json(profile.clone()))
    }
}
