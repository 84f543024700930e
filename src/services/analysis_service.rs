// src/services/analysis_service.rs
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::AnalysisService;
use crate::core::ServiceClient;
use crate::types::{analysis::DEFAULT_CRITERIA, response::AnalysisRequest, AnalysisResult};

const ANALYZE_ENDPOINT: &str = "/analisar";

/// Client for the backend's AI scoring endpoint
pub struct AnalysisClient {
    client: Arc<ServiceClient>,
}

impl AnalysisClient {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }
}

impl AnalysisService for AnalysisClient {
    async fn analyze(&self, answer_id: &str, question_context: &str) -> Result<AnalysisResult> {
        info!("Requesting analysis for answer {}", answer_id);

        let payload = AnalysisRequest {
            resposta_id: answer_id,
            criterios: DEFAULT_CRITERIA.to_vec(),
            contexto_pergunta: question_context,
        };

        let body: Value = self
            .client
            .post_json(ANALYZE_ENDPOINT, &payload)
            .await
            .context("AI analysis failed")?;

        let result = AnalysisResult::from_value(&body)
            .with_context(|| format!("Unusable analysis response: {}", body))?;

        info!(
            "Analysis for answer {} completed with score {}",
            answer_id,
            result.rounded_score()
        );
        Ok(result)
    }
}
