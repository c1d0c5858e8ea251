// src/infrastructure/api/curriculum.rs
use super::{ApiClient, Params};
use crate::domain::ApiError;
use serde_json::Value;

/// Read-only curriculum catalogue.
pub struct CurriculumApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CurriculumApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn subjects(&self) -> Result<Value, ApiError> {
        self.client.get("/curriculum/subjects/", &[])
    }

    pub fn grades(&self) -> Result<Value, ApiError> {
        self.client.get("/curriculum/grades/", &[])
    }

    pub fn curriculums(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/curriculum/curriculums/", params)
    }

    pub fn curriculum(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/curriculum/curriculums/{id}/"), &[])
    }

    pub fn chapters(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/curriculum/chapters/", params)
    }

    pub fn chapter(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/curriculum/chapters/{id}/"), &[])
    }

    pub fn knowledge_points(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/curriculum/knowledge-points/", params)
    }

    pub fn knowledge_point(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/curriculum/knowledge-points/{id}/"), &[])
    }

    /// Knowledge points of a whole curriculum, ordered by chapter then position.
    pub fn knowledge_points_by_curriculum(&self, curriculum_id: i64) -> Result<Value, ApiError> {
        self.client.get(
            &format!("/curriculum/knowledge-points/by-curriculum/{curriculum_id}/"),
            &[],
        )
    }

    pub fn learning_resources(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/curriculum/learning-resources/", params)
    }

    pub fn learning_resource(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/curriculum/learning-resources/{id}/"), &[])
    }
}
