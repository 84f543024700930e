// src/ranking/export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::types::RankedCandidate;

#[derive(Debug, Serialize)]
struct LeaderboardRow<'a> {
    position: usize,
    candidate: &'a str,
    score: i64,
    status: &'static str,
    question: &'a str,
    answer_id: &'a str,
}

/// Write a leaderboard as CSV, one row per candidate in ranking order
pub fn write_leaderboard_csv<W: Write>(writer: W, candidates: &[RankedCandidate]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (idx, candidate) in candidates.iter().enumerate() {
        csv_writer
            .serialize(LeaderboardRow {
                position: idx + 1,
                candidate: &candidate.candidate_name,
                score: candidate.score,
                status: candidate.status.as_str(),
                question: &candidate.question_text,
                answer_id: &candidate.answer_id,
            })
            .context("Failed to write leaderboard row")?;
    }

    csv_writer.flush().context("Failed to flush leaderboard CSV")?;
    Ok(())
}

pub fn export_leaderboard(path: &Path, candidates: &[RankedCandidate]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_leaderboard_csv(file, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::aggregator::{rank_tag, AnalysisSnapshot};
    use crate::ranking::fixtures::{analysis, answer, question};

    #[test]
    fn test_csv_rows_follow_ranking() {
        let questions = vec![question("Q1", "What is JSX?", &["React"], "r1")];
        let answers = vec![answer("A1", "Q1", "Ana"), answer("A2", "Q1", "Bia")];
        let cache: AnalysisSnapshot = [("A2".to_string(), analysis(75.0))].into_iter().collect();

        let ranking = rank_tag("r1", "React", &questions, &answers, &cache);
        let mut buffer = Vec::new();
        write_leaderboard_csv(&mut buffer, &ranking).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "position,candidate,score,status,question,answer_id");
        assert_eq!(lines[1], "1,Bia,75,analyzed,What is JSX?,A2");
        assert_eq!(lines[2], "2,Ana,0,pending,What is JSX?,A1");
    }
}
