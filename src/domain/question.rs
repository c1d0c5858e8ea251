// src/domain/question.rs
use std::path::PathBuf;

/// User input for creating or editing a mistaken question.
///
/// Sent as multipart form data because of the optional image attachment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionForm {
    pub content: Option<String>,
    pub answer: Option<String>,
    pub explanation: Option<String>,
    pub knowledge_points: Vec<String>,
    pub image: Option<PathBuf>,
}

impl QuestionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_knowledge_point(mut self, knowledge_point: impl Into<String>) -> Self {
        self.knowledge_points.push(knowledge_point.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }
}
