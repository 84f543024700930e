// src/ranking/mod.rs
//! Candidate ranking and tag aggregates built from backend data and the local analysis cache

pub mod aggregator;
pub mod analysis_flow;
pub mod export;
pub mod grouping;
pub mod stats;

pub use aggregator::{load_snapshot, rank_question, rank_tag, AnalysisSnapshot, RankingAggregator};
pub use analysis_flow::{AnalysisFlow, ResolvedAnalysis};
pub use export::{export_leaderboard, write_leaderboard_csv};
pub use grouping::{
    candidate_openings, group_by_tag, questions_for_tag, recruiter_tag_summaries, JobOpening,
    OpeningStatus, TagGroup, TagQuestions, TagSummary,
};
pub use stats::{ScoreBand, TagScoreStats};
