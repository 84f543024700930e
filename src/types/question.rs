// src/types/question.rs
use serde::{Deserialize, Serialize};

use super::{non_null_strings, null_as_default};

/// Grouping key for questions created without any tag
pub const DEFAULT_GROUPING_KEY: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "texto", default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "non_null_strings")]
    pub tags: Vec<String>,
    #[serde(rename = "usuarioId", default)]
    pub author_id: Option<String>,
}

impl Question {
    /// First tag, used as the job/topic title of the question
    pub fn grouping_key(&self) -> &str {
        self.tags
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_GROUPING_KEY)
    }

    /// Answers can only point at questions the backend gave an id
    pub fn is_referenceable(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.author_id.as_deref() == Some(owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_key_uses_first_tag() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "texto": "What is a hook?",
            "tags": ["React", "Frontend"],
            "usuarioId": "r1"
        }))
        .unwrap();

        assert_eq!(question.grouping_key(), "React");
        assert!(question.has_tag("Frontend"));
        assert!(question.is_owned_by("r1"));
        assert!(!question.is_owned_by("r2"));
    }

    #[test]
    fn test_missing_or_null_tags_fall_back_to_general() {
        let without: Question =
            serde_json::from_value(serde_json::json!({"id": "q1", "texto": "a"})).unwrap();
        let null_tags: Question =
            serde_json::from_value(serde_json::json!({"id": "q2", "texto": "b", "tags": null}))
                .unwrap();

        assert_eq!(without.grouping_key(), DEFAULT_GROUPING_KEY);
        assert_eq!(null_tags.grouping_key(), DEFAULT_GROUPING_KEY);
        assert!(without.author_id.is_none());
    }

    #[test]
    fn test_null_tag_entries_and_ids_do_not_reject_the_listing() {
        let questions: Vec<Question> = serde_json::from_value(serde_json::json!([
            {"id": "q1", "texto": "Props?", "tags": [null, "React", null]},
            {"id": null, "texto": "Orphan", "tags": ["Go"]}
        ]))
        .unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].tags, vec!["React"]);
        assert_eq!(questions[0].grouping_key(), "React");
        assert!(questions[0].is_referenceable());
        assert!(!questions[1].is_referenceable());
    }
}
