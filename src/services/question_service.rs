// src/services/question_service.rs
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::QuestionStore;
use crate::core::ServiceClient;
use crate::types::{response::NewQuestionRequest, Question, SessionContext};

const QUESTIONS_ENDPOINT: &str = "/perguntas";

pub struct QuestionService {
    client: Arc<ServiceClient>,
}

impl QuestionService {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Create a question under a single tag, owned by the signed-in recruiter
    pub async fn create(&self, text: &str, tag: &str, session: &SessionContext) -> Result<Value> {
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("Question text must not be empty");
        }

        let payload = NewQuestionRequest {
            texto: text,
            tags: vec![tag],
            usuario_id: &session.user_id,
        };

        info!("Creating question under tag '{}' for {}", tag, session.user_id);
        self.client
            .post_json(QUESTIONS_ENDPOINT, &payload)
            .await
            .context("Failed to create question")
    }

    /// Create several questions under the same tag; requests are issued concurrently
    pub async fn create_many(
        &self,
        texts: &[String],
        tag: &str,
        session: &SessionContext,
    ) -> Result<Vec<Value>> {
        try_join_all(texts.iter().map(|text| self.create(text, tag, session))).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        info!("Deleting question {}", id);
        self.client
            .delete(&format!("{}/{}", QUESTIONS_ENDPOINT, id))
            .await
            .with_context(|| format!("Failed to delete question {}", id))
    }
}

impl QuestionStore for QuestionService {
    async fn list_all(&self) -> Result<Vec<Question>> {
        let questions: Vec<Question> = self
            .client
            .get(QUESTIONS_ENDPOINT)
            .await
            .context("Failed to fetch questions")?;
        info!("Fetched {} questions", questions.len());
        Ok(questions)
    }
}
