// src/types/ranking.rs
use serde::Serialize;

use super::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingStatus {
    Analyzed,
    Pending,
}

impl RankingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyzed => "analyzed",
            Self::Pending => "pending",
        }
    }
}

/// One leaderboard row; derived on every ranking run, never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub answer_id: String,
    pub candidate_name: String,
    pub answer_text: String,
    pub score: i64,
    pub analysis: Option<AnalysisResult>,
    pub status: RankingStatus,
    pub question_text: String,
    /// 1-based position of the answered question among the ranked tag's questions
    pub question_index_within_tag: usize,
}

impl RankedCandidate {
    pub fn is_pending(&self) -> bool {
        self.status == RankingStatus::Pending
    }
}
