// src/cli/output.rs
use crate::domain::curriculum::{Grade, KnowledgePoint, LearningResource, Subject};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// How a listing should be summarised when `--json` is not given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    Raw,
    Subjects,
    Grades,
    KnowledgePoints,
    Resources,
}

pub fn render(value: &Value, summary: Summary, json: bool) -> Result<String> {
    if json || summary == Summary::Raw {
        return pretty(value);
    }

    // Paginated responses wrap the rows in `results`
    let rows = value.get("results").unwrap_or(value);
    let lines = match summary {
        Summary::Subjects => rows_of::<Subject>(rows)?
            .iter()
            .map(|s| format!("{}\t{}\t{}", s.id, s.code, s.name))
            .collect::<Vec<_>>(),
        Summary::Grades => rows_of::<Grade>(rows)?
            .iter()
            .map(|g| format!("{}\t{}\t{}", g.id, g.code, g.name))
            .collect(),
        Summary::KnowledgePoints => rows_of::<KnowledgePoint>(rows)?
            .iter()
            .map(|kp| format!("{}\t{}\t{}", kp.id, kp.difficulty.label(), kp.name))
            .collect(),
        Summary::Resources => rows_of::<LearningResource>(rows)?
            .iter()
            .map(|r| {
                let star = if r.is_recommended { "*" } else { " " };
                format!("{}{}\t{:?}\t{}\t{}", star, r.id, r.resource_type, r.title, r.url)
            })
            .collect(),
        Summary::Raw => unreachable!("handled above"),
    };
    Ok(lines.join("\n"))
}

pub fn pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to format response")
}

fn rows_of<T: DeserializeOwned>(rows: &Value) -> Result<Vec<T>> {
    serde_json::from_value(rows.clone()).context("Unexpected response shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_subject_list_when_rendering_summary_then_prints_one_line_each() {
        let value = json!([
            {"id": 1, "name": "Mathematics", "code": "math"},
            {"id": 2, "name": "Physics", "code": "phys"}
        ]);

        let out = render(&value, Summary::Subjects, false).unwrap();

        assert_eq!(out, "1\tmath\tMathematics\n2\tphys\tPhysics");
    }

    #[test]
    fn given_paginated_knowledge_points_when_rendering_then_reads_results() {
        let value = json!({"count": 1, "results": [{"id": 4, "name": "Limits", "difficulty": 3}]});

        let out = render(&value, Summary::KnowledgePoints, false).unwrap();

        assert_eq!(out, "4\thard\tLimits");
    }

    #[test]
    fn given_json_flag_when_rendering_then_prints_raw_payload() {
        let value = json!([{"id": 1, "name": "Grade 10", "code": "g10"}]);

        let out = render(&value, Summary::Grades, true).unwrap();

        assert!(out.contains("\"code\": \"g10\""));
    }

    #[test]
    fn given_unexpected_shape_when_rendering_summary_then_errors() {
        let result = render(&json!({"detail": "odd"}), Summary::Subjects, false);

        assert!(result.is_err());
    }
}
