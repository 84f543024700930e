// src/ranking/aggregator.rs
//! Candidate leaderboards: joins questions, answers and cached analyses into a score-ordered list

use anyhow::Result;
use futures::future::join_all;
use std::collections::HashMap;
use tracing::info;

use crate::services::{AnalysisCache, AnswerStore, QuestionStore};
use crate::types::{
    AnalysisResult, AnalysisSource, Answer, Question, RankedCandidate, RankingStatus,
    SessionContext,
};

/// Answer id -> analysis, read from the local cache before a ranking run
pub type AnalysisSnapshot = HashMap<String, AnalysisResult>;

struct QuestionRef<'a> {
    text: &'a str,
    ordinal: usize,
}

/// Rank every answer given to `owner_id`'s questions carrying `tag`.
///
/// Scores are ordered descending with a stable sort, so equal scores keep the
/// answers' input order. Answers without any analysis are kept as pending with
/// a score of 0.
pub fn rank_tag(
    owner_id: &str,
    tag: &str,
    questions: &[Question],
    answers: &[Answer],
    cache: &AnalysisSnapshot,
) -> Vec<RankedCandidate> {
    let question_refs: HashMap<&str, QuestionRef> = questions
        .iter()
        .filter(|q| q.is_referenceable() && q.is_owned_by(owner_id) && q.has_tag(tag))
        .enumerate()
        .map(|(idx, q)| {
            (
                q.id.as_str(),
                QuestionRef {
                    text: &q.text,
                    ordinal: idx + 1,
                },
            )
        })
        .collect();

    let candidates = answers
        .iter()
        .filter_map(|answer| {
            let question = question_refs.get(answer.question_id.as_str())?;
            Some(build_candidate(answer, question.text, question.ordinal, cache))
        })
        .collect();

    sort_by_score(candidates)
}

/// Rank every answer given to a single question
pub fn rank_question(
    question: &Question,
    answers: &[Answer],
    cache: &AnalysisSnapshot,
) -> Vec<RankedCandidate> {
    let candidates = answers
        .iter()
        .filter(|answer| answer.answers(question))
        .map(|answer| build_candidate(answer, &question.text, 1, cache))
        .collect();

    sort_by_score(candidates)
}

/// Cache entry first, then the analysis embedded in the answer
pub fn resolve_analysis(
    answer: &Answer,
    cache: &AnalysisSnapshot,
) -> Option<(AnalysisResult, AnalysisSource)> {
    if let Some(cached) = cache.get(&answer.id) {
        return Some((cached.clone(), AnalysisSource::Cache));
    }
    answer
        .embedded_result()
        .map(|embedded| (embedded, AnalysisSource::Embedded))
}

fn build_candidate(
    answer: &Answer,
    question_text: &str,
    question_index: usize,
    cache: &AnalysisSnapshot,
) -> RankedCandidate {
    let (score, analysis, status) = match resolve_analysis(answer, cache) {
        Some((analysis, _)) => (
            analysis.rounded_score(),
            Some(analysis),
            RankingStatus::Analyzed,
        ),
        None => (0, None, RankingStatus::Pending),
    };

    RankedCandidate {
        answer_id: answer.id.clone(),
        candidate_name: answer.candidate_name.clone(),
        answer_text: answer.text.clone(),
        score,
        analysis,
        status,
        question_text: question_text.to_string(),
        question_index_within_tag: question_index,
    }
}

fn sort_by_score(mut candidates: Vec<RankedCandidate>) -> Vec<RankedCandidate> {
    // Vec::sort_by is stable
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Read every cached analysis; unreadable entries are left out
pub async fn load_snapshot<C: AnalysisCache>(cache: &C) -> AnalysisSnapshot {
    let keys = cache.keys().await;
    let entries = join_all(keys.into_iter().map(|key| async move {
        let result = cache.get(&key).await;
        (key, result)
    }))
    .await;

    entries
        .into_iter()
        .filter_map(|(key, result)| result.map(|r| (key, r)))
        .collect()
}

/// Fetches the three ranking inputs concurrently and runs the pure ranking over them
pub struct RankingAggregator<'a, Q, A, C> {
    questions: &'a Q,
    answers: &'a A,
    cache: &'a C,
}

impl<'a, Q, A, C> RankingAggregator<'a, Q, A, C>
where
    Q: QuestionStore,
    A: AnswerStore,
    C: AnalysisCache,
{
    pub fn new(questions: &'a Q, answers: &'a A, cache: &'a C) -> Self {
        Self {
            questions,
            answers,
            cache,
        }
    }

    /// All questions, all answers and the cache snapshot; any fetch failure aborts the whole load
    pub async fn fetch_all(&self) -> Result<(Vec<Question>, Vec<Answer>, AnalysisSnapshot)> {
        tokio::try_join!(
            self.questions.list_all(),
            self.answers.list_all(),
            async { Ok::<_, anyhow::Error>(load_snapshot(self.cache).await) },
        )
    }

    /// Leaderboard for one of the signed-in recruiter's tags
    pub async fn rank_tag(
        &self,
        session: &SessionContext,
        tag: &str,
    ) -> Result<Vec<RankedCandidate>> {
        let (questions, answers, snapshot) = self.fetch_all().await?;
        let ranking = rank_tag(&session.user_id, tag, &questions, &answers, &snapshot);

        info!(
            "Ranked {} candidates for tag '{}' ({} pending)",
            ranking.len(),
            tag,
            ranking.iter().filter(|c| c.is_pending()).count()
        );
        Ok(ranking)
    }

    /// Leaderboard for a single question
    pub async fn rank_question(&self, question_id: &str) -> Result<Vec<RankedCandidate>> {
        let (questions, answers, snapshot) = self.fetch_all().await?;
        let question = questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| anyhow::anyhow!("Question not found: {}", question_id))?;

        let ranking = rank_question(question, &answers, &snapshot);
        info!(
            "Ranked {} candidates for question {}",
            ranking.len(),
            question_id
        );
        Ok(ranking)
    }
}
