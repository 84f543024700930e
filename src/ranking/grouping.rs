// src/ranking/grouping.rs
//! Tag-level aggregates for the listing views. Groups are emitted in the
//! order their key is first seen in the input.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::types::{Answer, Question};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub tag: String,
    pub question_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub tag: String,
    pub candidate_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningStatus {
    New,
    InProgress,
}

impl OpeningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
        }
    }
}

/// A job/topic as seen by a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOpening {
    pub tag: String,
    pub question_count: usize,
    pub status: OpeningStatus,
}

/// Questions listed under a tag, with what the current candidate already answered
#[derive(Debug, Clone, Default)]
pub struct TagQuestions {
    pub questions: Vec<Question>,
    pub answered_question_ids: HashSet<String>,
}

impl TagQuestions {
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answered_question_ids.contains(question_id)
    }
}

/// Keeps insertion order of keys while counting
#[derive(Default)]
struct OrderedCounter {
    keys: Vec<String>,
    counts: HashMap<String, usize>,
}

impl OrderedCounter {
    fn touch(&mut self, key: &str) -> &mut usize {
        if !self.counts.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.counts.entry(key.to_string()).or_insert(0)
    }

    fn into_pairs(self) -> Vec<(String, usize)> {
        let OrderedCounter { keys, counts } = self;
        keys.into_iter()
            .map(|key| {
                let count = counts.get(&key).copied().unwrap_or(0);
                (key, count)
            })
            .collect()
    }
}

/// Count questions per grouping key
pub fn group_by_tag(questions: &[Question]) -> Vec<TagGroup> {
    let mut counter = OrderedCounter::default();
    for question in questions {
        *counter.touch(question.grouping_key()) += 1;
    }

    counter
        .into_pairs()
        .into_iter()
        .map(|(tag, question_count)| TagGroup {
            tag,
            question_count,
        })
        .collect()
}

/// Answers received per grouping key of the recruiter's own questions.
/// Keys with no answers report 0.
pub fn recruiter_tag_summaries(
    owner_id: &str,
    questions: &[Question],
    answers: &[Answer],
) -> Vec<TagSummary> {
    let mut counter = OrderedCounter::default();
    let mut question_tags: HashMap<&str, &str> = HashMap::new();

    for question in questions.iter().filter(|q| q.is_owned_by(owner_id)) {
        counter.touch(question.grouping_key());
        if question.is_referenceable() {
            question_tags.insert(question.id.as_str(), question.grouping_key());
        }
    }

    for answer in answers {
        if let Some(tag) = question_tags.get(answer.question_id.as_str()) {
            *counter.touch(tag) += 1;
        }
    }

    counter
        .into_pairs()
        .into_iter()
        .map(|(tag, candidate_count)| TagSummary {
            tag,
            candidate_count,
        })
        .collect()
}

/// Every grouping key with its question count, marked in progress once the
/// candidate answered any of them
pub fn candidate_openings(
    candidate_id: &str,
    questions: &[Question],
    answers: &[Answer],
) -> Vec<JobOpening> {
    let answered: HashSet<&str> = answers
        .iter()
        .filter(|a| a.is_authored_by(candidate_id))
        .map(|a| a.question_id.as_str())
        .collect();

    let mut counter = OrderedCounter::default();
    let mut started: HashSet<String> = HashSet::new();

    for question in questions {
        let key = question.grouping_key();
        *counter.touch(key) += 1;
        if question.is_referenceable() && answered.contains(question.id.as_str()) {
            started.insert(key.to_string());
        }
    }

    counter
        .into_pairs()
        .into_iter()
        .map(|(tag, question_count)| {
            let status = if started.contains(&tag) {
                OpeningStatus::InProgress
            } else {
                OpeningStatus::New
            };
            JobOpening {
                tag,
                question_count,
                status,
            }
        })
        .collect()
}

/// Every question carrying `tag`, plus the ids `candidate_id` already answered
pub fn questions_for_tag(
    tag: &str,
    candidate_id: Option<&str>,
    questions: &[Question],
    answers: &[Answer],
) -> TagQuestions {
    let questions: Vec<Question> = questions.iter().filter(|q| q.has_tag(tag)).cloned().collect();

    let answered_question_ids = match candidate_id {
        Some(id) => answers
            .iter()
            .filter(|a| a.is_authored_by(id))
            .map(|a| a.question_id.clone())
            .collect(),
        None => HashSet::new(),
    };

    TagQuestions {
        questions,
        answered_question_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::fixtures::{answer, answer_by, question};
    use crate::types::DEFAULT_GROUPING_KEY;

    #[test]
    fn test_group_by_tag_first_seen_order() {
        let questions = vec![
            question("Q1", "a", &["Rust"], "r1"),
            question("Q2", "b", &["React", "Rust"], "r1"),
            question("Q3", "c", &[], "r2"),
            question("Q4", "d", &["Rust"], "r2"),
        ];

        let groups = group_by_tag(&questions);
        assert_eq!(
            groups,
            vec![
                TagGroup {
                    tag: "Rust".to_string(),
                    question_count: 2,
                },
                TagGroup {
                    tag: "React".to_string(),
                    question_count: 1,
                },
                TagGroup {
                    tag: DEFAULT_GROUPING_KEY.to_string(),
                    question_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_group_set_is_order_independent() {
        let mut questions = vec![
            question("Q1", "a", &["Rust"], "r1"),
            question("Q2", "b", &["React"], "r1"),
            question("Q3", "c", &["Rust"], "r1"),
        ];
        let forward = group_by_tag(&questions);
        questions.reverse();
        let mut backward = group_by_tag(&questions);

        assert_eq!(backward[0].tag, "Rust");
        backward.sort_by(|a, b| a.tag.cmp(&b.tag));
        let mut forward_sorted = forward.clone();
        forward_sorted.sort_by(|a, b| a.tag.cmp(&b.tag));
        assert_eq!(forward_sorted, backward);
        assert!(group_by_tag(&[]).is_empty());
    }

    #[test]
    fn test_recruiter_summaries_count_answers_and_keep_empty_tags() {
        let questions = vec![
            question("Q1", "a", &["Rust"], "r1"),
            question("Q2", "b", &["Go"], "r1"),
            question("Q3", "c", &["Rust"], "r2"),
        ];
        let answers = vec![
            answer("A1", "Q1", "Ana"),
            answer("A2", "Q1", "Bia"),
            answer("A3", "Q3", "Caio"),
        ];

        let summaries = recruiter_tag_summaries("r1", &questions, &answers);
        assert_eq!(
            summaries,
            vec![
                TagSummary {
                    tag: "Rust".to_string(),
                    candidate_count: 2,
                },
                TagSummary {
                    tag: "Go".to_string(),
                    candidate_count: 0,
                },
            ]
        );
    }

    #[test]
    fn test_candidate_openings_status() {
        let questions = vec![
            question("Q1", "a", &["Rust"], "r1"),
            question("Q2", "b", &["Go"], "r1"),
            question("Q3", "c", &["Rust"], "r2"),
        ];
        let answers = vec![
            answer_by("A1", "Q3", "Ana", "c1"),
            answer_by("A2", "Q2", "Bia", "c2"),
        ];

        let openings = candidate_openings("c1", &questions, &answers);
        assert_eq!(openings.len(), 2);
        assert_eq!(openings[0].tag, "Rust");
        assert_eq!(openings[0].question_count, 2);
        assert_eq!(openings[0].status, OpeningStatus::InProgress);
        assert_eq!(openings[1].status, OpeningStatus::New);
    }

    #[test]
    fn test_questions_for_tag_marks_answered() {
        let questions = vec![
            question("Q1", "a", &["Rust"], "r1"),
            question("Q2", "b", &["Backend", "Rust"], "r2"),
            question("Q3", "c", &["Go"], "r1"),
        ];
        let answers = vec![answer_by("A1", "Q2", "Ana", "c1")];

        let listing = questions_for_tag("Rust", Some("c1"), &questions, &answers);
        assert_eq!(listing.questions.len(), 2);
        assert!(listing.is_answered("Q2"));
        assert!(!listing.is_answered("Q1"));

        let anonymous = questions_for_tag("Rust", None, &questions, &answers);
        assert!(anonymous.answered_question_ids.is_empty());
    }
}
