// src/infrastructure/api/questions.rs
use super::{ApiClient, Params};
use crate::domain::{ApiError, QuestionForm};
use crate::ports::{FormPart, RequestBody};
use serde_json::Value;

pub struct QuestionApi<'a> {
    client: &'a ApiClient,
}

impl<'a> QuestionApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self, params: &Params) -> Result<Value, ApiError> {
        self.client.get("/questions/", params)
    }

    pub fn get(&self, id: i64) -> Result<Value, ApiError> {
        self.client.get(&format!("/questions/{id}/"), &[])
    }

    pub fn create(&self, form: &QuestionForm) -> Result<Value, ApiError> {
        self.client.post("/questions/", multipart_body(form))
    }

    pub fn update(&self, id: i64, form: &QuestionForm) -> Result<Value, ApiError> {
        self.client.put(&format!("/questions/{id}/"), multipart_body(form))
    }

    pub fn delete(&self, id: i64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/questions/{id}/"))
    }
}

/// Image first, then the non-empty text fields, then one part per knowledge point.
pub fn multipart_body(form: &QuestionForm) -> RequestBody {
    let mut parts = Vec::new();

    if let Some(image) = &form.image {
        parts.push(FormPart::File {
            name: "image".to_string(),
            path: image.clone(),
        });
    }

    let text_fields = [
        ("content", &form.content),
        ("answer", &form.answer),
        ("explanation", &form.explanation),
    ];
    for (name, value) in text_fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            parts.push(FormPart::Text {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    parts.extend(form.knowledge_points.iter().map(|kp| FormPart::Text {
        name: "knowledge_points".to_string(),
        value: kp.clone(),
    }));

    RequestBody::Multipart(parts)
}
