// src/ranking/stats.rs
use serde::Serialize;

use crate::types::RankedCandidate;

const STRONG_THRESHOLD: i64 = 80;
const MODERATE_THRESHOLD: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> Self {
        if score >= STRONG_THRESHOLD {
            Self::Strong
        } else if score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

/// Score distribution of one leaderboard. Pending entries are counted but
/// excluded from the mean, range and bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagScoreStats {
    pub tag: String,
    pub total: usize,
    pub analyzed: usize,
    pub pending: usize,
    pub mean_score: Option<f64>,
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
}

impl TagScoreStats {
    pub fn from_candidates(tag: &str, candidates: &[RankedCandidate]) -> Self {
        let scores: Vec<i64> = candidates
            .iter()
            .filter(|c| !c.is_pending())
            .map(|c| c.score)
            .collect();

        let mean_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<i64>() as f64 / scores.len() as f64)
        };

        let band_count =
            |band: ScoreBand| scores.iter().filter(|s| ScoreBand::from_score(**s) == band).count();

        Self {
            tag: tag.to_string(),
            total: candidates.len(),
            analyzed: scores.len(),
            pending: candidates.len() - scores.len(),
            mean_score,
            min_score: scores.iter().min().copied(),
            max_score: scores.iter().max().copied(),
            strong: band_count(ScoreBand::Strong),
            moderate: band_count(ScoreBand::Moderate),
            weak: band_count(ScoreBand::Weak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::aggregator::{rank_tag, AnalysisSnapshot};
    use crate::ranking::fixtures::{analysis, answer, question};

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(49), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Weak);
    }

    #[test]
    fn test_stats_exclude_pending() {
        let questions = vec![question("Q1", "Q", &["React"], "r1")];
        let answers = vec![
            answer("A1", "Q1", "Ana"),
            answer("A2", "Q1", "Bia"),
            answer("A3", "Q1", "Caio"),
            answer("A4", "Q1", "Duda"),
        ];
        let cache: AnalysisSnapshot = [("A1", 90.0), ("A2", 60.0), ("A3", 30.0)]
            .into_iter()
            .map(|(id, s)| (id.to_string(), analysis(s)))
            .collect();

        let ranking = rank_tag("r1", "React", &questions, &answers, &cache);
        let stats = TagScoreStats::from_candidates("React", &ranking);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.analyzed, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.mean_score, Some(60.0));
        assert_eq!(stats.min_score, Some(30));
        assert_eq!(stats.max_score, Some(90));
        assert_eq!((stats.strong, stats.moderate, stats.weak), (1, 1, 1));
    }

    #[test]
    fn test_stats_of_empty_board() {
        let stats = TagScoreStats::from_candidates("Go", &[]);
        assert_eq!(stats.total, 0);
        assert!(stats.mean_score.is_none());
        assert!(stats.max_score.is_none());
    }
}
