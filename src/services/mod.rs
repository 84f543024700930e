// src/services/mod.rs
//! Backend clients and the collaborator interfaces the ranking pipeline depends on

use anyhow::Result;
use std::future::Future;

use crate::types::{AnalysisResult, Answer, Question};

pub mod analysis_service;
pub mod answer_service;
pub mod auth_service;
pub mod question_service;

pub use analysis_service::AnalysisClient;
pub use answer_service::AnswerService;
pub use auth_service::AuthService;
pub use question_service::QuestionService;

/// Source of every question known to the backend
pub trait QuestionStore {
    fn list_all(&self) -> impl Future<Output = Result<Vec<Question>>> + Send;
}

/// Source of every answer known to the backend
pub trait AnswerStore {
    fn list_all(&self) -> impl Future<Output = Result<Vec<Answer>>> + Send;
}

/// Local answer id -> analysis store.
///
/// Reads never fail: a missing or unreadable entry is reported as `None`.
pub trait AnalysisCache {
    fn get(&self, answer_id: &str) -> impl Future<Output = Option<AnalysisResult>> + Send;

    fn put(
        &self,
        answer_id: &str,
        result: &AnalysisResult,
    ) -> impl Future<Output = Result<()>> + Send;

    fn keys(&self) -> impl Future<Output = Vec<String>> + Send;
}

/// Remote AI scoring of a single answer
pub trait AnalysisService {
    fn analyze(
        &self,
        answer_id: &str,
        question_context: &str,
    ) -> impl Future<Output = Result<AnalysisResult>> + Send;
}
