//! Recruiter/candidate screening client: talks to the recruiting backend,
//! keeps AI analyses in a local cache and ranks candidates per tag.

pub mod cli;
pub mod core;
pub mod ranking;
pub mod services;
pub mod types;

pub use crate::core::{ConfigManager, Database, ServiceClient};
pub use ranking::{rank_tag, RankingAggregator};
pub use types::{AnalysisResult, Answer, Question, RankedCandidate, RankingStatus, SessionContext};
