// src/infrastructure/api/analysis.rs
use super::{ApiClient, Params};
use crate::domain::ApiError;
use crate::ports::RequestBody;
use serde_json::Value;

pub struct AnalysisApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalysisApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn weakness(&self) -> Result<Value, ApiError> {
        self.client.get("/analysis/weakness/", &[])
    }

    pub fn recommendations(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/analysis/recommendations/", params)
    }

    /// Builds a practice test targeting weak knowledge points. Read-only on the server.
    pub fn generate_test(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/analysis/generate-test/", params)
    }

    pub fn progress_tracker(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/analysis/progress-tracker/", params)
    }

    pub fn update_progress(&self, data: &Value) -> Result<Value, ApiError> {
        self.client
            .post("/analysis/update-progress/", RequestBody::Json(data.clone()))
    }

    pub fn learning_plans(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/analysis/learning-plans/", params)
    }

    pub fn learning_plan(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/analysis/learning-plans/{id}/"), &[])
    }

    pub fn create_learning_plan(&self, plan: &Value) -> Result<Value, ApiError> {
        self.client
            .post("/analysis/learning-plans/", RequestBody::Json(plan.clone()))
    }

    pub fn update_learning_plan(&self, id: i64, plan: &Value) -> Result<Value, ApiError> {
        self.client.put(
            &format!("/analysis/learning-plans/{id}/"),
            RequestBody::Json(plan.clone()),
        )
    }

    pub fn learning_plan_items(&self, plan_id: i64) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/analysis/learning-plans/{plan_id}/items/"), &[])
    }

    pub fn update_learning_plan_item(&self, item_id: i64, item: &Value) -> Result<Value, ApiError> {
        self.client.put(
            &format!("/analysis/learning-plan-items/{item_id}/"),
            RequestBody::Json(item.clone()),
        )
    }

    pub fn reports(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/analysis/reports/", params)
    }

    pub fn report(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/analysis/reports/{id}/"), &[])
    }
}
