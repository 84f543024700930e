// src/types/answer.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{null_as_default, AnalysisResult, Question};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Empty when the backend lost the link to the question
    #[serde(rename = "perguntaId", default, deserialize_with = "null_as_default")]
    pub question_id: String,
    #[serde(rename = "usuarioId", default)]
    pub author_id: Option<String>,
    #[serde(rename = "candidato", default, deserialize_with = "null_as_default")]
    pub candidate_name: String,
    #[serde(rename = "resposta", default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Analysis written by the backend alongside the answer, kept raw until resolved
    #[serde(rename = "analise", default, skip_serializing_if = "Option::is_none")]
    pub embedded_analysis: Option<Value>,
}

impl Answer {
    pub fn embedded_result(&self) -> Option<AnalysisResult> {
        self.embedded_analysis
            .as_ref()
            .and_then(AnalysisResult::from_value)
    }

    pub fn answers(&self, question: &Question) -> bool {
        question.is_referenceable() && self.question_id == question.id
    }

    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id.as_deref() == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_answer() {
        let answer: Answer = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "perguntaId": "q1",
            "usuarioId": "c1",
            "candidato": "Ana",
            "resposta": "Hooks let function components keep state",
            "analise": {"score": 64.4}
        }))
        .unwrap();

        assert_eq!(answer.question_id, "q1");
        assert_eq!(answer.candidate_name, "Ana");
        assert!(answer.is_authored_by("c1"));
        assert_eq!(answer.embedded_result().unwrap().overall_score, 64.4);
    }

    #[test]
    fn test_null_analysis_is_absent() {
        let answer: Answer = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "perguntaId": "q1",
            "candidato": null,
            "resposta": "text",
            "analise": null
        }))
        .unwrap();

        assert_eq!(answer.candidate_name, "");
        assert!(answer.embedded_result().is_none());
    }

    #[test]
    fn test_orphan_answer_keeps_the_listing_readable() {
        let answers: Vec<Answer> = serde_json::from_value(serde_json::json!([
            {"id": "a1", "perguntaId": "q1", "candidato": "Ana", "resposta": "ok"},
            {"id": "a2", "perguntaId": null, "candidato": "Bia", "resposta": "lost"},
            {"id": null, "candidato": "Caio", "resposta": "no ids"}
        ]))
        .unwrap();

        assert_eq!(answers.len(), 3);
        assert_eq!(answers[1].question_id, "");
        assert_eq!(answers[2].id, "");

        let orphan_target = Question {
            id: String::new(),
            text: "Orphan".to_string(),
            tags: vec![],
            author_id: None,
        };
        assert!(!answers[1].answers(&orphan_target));
    }
}
