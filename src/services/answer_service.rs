// src/services/answer_service.rs
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::AnswerStore;
use crate::core::ServiceClient;
use crate::types::{response::NewAnswerRequest, Answer, SessionContext};

const ANSWERS_ENDPOINT: &str = "/respostas";
const ANONYMOUS_CANDIDATE: &str = "Candidato Anônimo";

pub struct AnswerService {
    client: Arc<ServiceClient>,
}

impl AnswerService {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Submit the signed-in candidate's answer to a question
    pub async fn submit(
        &self,
        question_id: &str,
        text: &str,
        session: &SessionContext,
    ) -> Result<Value> {
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("Answer text must not be empty");
        }

        let payload = NewAnswerRequest {
            candidato: candidate_display_name(session),
            pergunta_id: question_id,
            resposta: text,
            usuario_id: &session.user_id,
        };

        info!("Submitting answer to question {} as {}", question_id, session.user_id);
        self.client
            .post_json(ANSWERS_ENDPOINT, &payload)
            .await
            .context("Backend rejected the answer")
    }
}

impl AnswerStore for AnswerService {
    async fn list_all(&self) -> Result<Vec<Answer>> {
        let answers: Vec<Answer> = self
            .client
            .get(ANSWERS_ENDPOINT)
            .await
            .context("Failed to fetch answers")?;
        info!("Fetched {} answers", answers.len());
        Ok(answers)
    }
}

fn candidate_display_name(session: &SessionContext) -> &str {
    if session.name.trim().is_empty() {
        ANONYMOUS_CANDIDATE
    } else {
        &session.name
    }
}
