// src/domain/curriculum.rs
//
// Typed views over the curriculum payloads. The API wrappers pass raw JSON
// through untouched; these are only used where the client needs to read fields.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Grade {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// List and detail responses differ: the list nests ids and adds `*_name`,
/// the detail nests whole objects. Both are accepted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Curriculum {
    pub id: i64,
    pub subject: serde_json::Value,
    pub grade: serde_json::Value,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub grade_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Chapter {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub curriculum: Option<i64>,
    #[serde(default)]
    pub knowledge_points: Vec<KnowledgePoint>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct KnowledgePoint {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub chapter: Option<i64>,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LearningResource {
    pub id: i64,
    pub knowledge_point: i64,
    pub title: String,
    pub resource_type: ResourceType,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recommended: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Challenge,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Challenge => "challenge",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            4 => Ok(Difficulty::Challenge),
            other => Err(format!("unknown difficulty level: {other}")),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Challenge => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Article,
    Exercise,
    Book,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_list_payload_when_parsing_curriculum_then_reads_names_and_chapters() {
        let payload = json!({
            "id": 3,
            "subject": 1,
            "grade": 2,
            "subject_name": "Mathematics",
            "grade_name": "Grade 10",
            "name": "Functions",
            "description": null,
            "chapters": [{"id": 7, "name": "Quadratics", "order": 1}]
        });

        let curriculum: Curriculum = serde_json::from_value(payload).unwrap();

        assert_eq!(curriculum.subject_name.as_deref(), Some("Mathematics"));
        assert_eq!(curriculum.chapters.len(), 1);
        assert_eq!(curriculum.chapters[0].name, "Quadratics");
        assert!(curriculum.chapters[0].knowledge_points.is_empty());
    }

    #[test]
    fn given_knowledge_point_without_difficulty_when_parsing_then_defaults_to_medium() {
        let kp: KnowledgePoint =
            serde_json::from_value(json!({"id": 1, "name": "Vieta's formulas"})).unwrap();

        assert_eq!(kp.difficulty, Difficulty::Medium);
    }

    #[test]
    fn given_out_of_range_difficulty_when_parsing_then_fails() {
        let result: Result<KnowledgePoint, _> =
            serde_json::from_value(json!({"id": 1, "name": "x", "difficulty": 9}));

        assert!(result.is_err());
    }

    #[test]
    fn given_resource_with_extra_fields_when_parsing_then_ignores_them() {
        let resource: LearningResource = serde_json::from_value(json!({
            "id": 5,
            "knowledge_point": 1,
            "title": "Completing the square",
            "resource_type": "video",
            "url": "https://example.com/v/5",
            "is_recommended": true,
            "created_at": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(resource.resource_type, ResourceType::Video);
        assert!(resource.is_recommended);
    }
}
