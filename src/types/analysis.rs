// src/types/analysis.rs
//! AI analysis results and the normalization of the loosely shaped JSON they arrive in

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Keys the scoring backend may nest the actual result under
const WRAPPER_KEYS: [&str; 2] = ["resultado", "result"];
/// Overall score field names, in precedence order
const OVERALL_KEYS: [&str; 2] = ["overall", "score"];
const CRITERIA_KEY: &str = "scores";
const NOTES_KEY: &str = "notes";
const CONCLUSION_KEYS: [&str; 3] = ["conclusao", "conclusion", "analise"];

/// Criteria the scoring service is asked to evaluate
pub const DEFAULT_CRITERIA: [&str; 4] = [
    "clareza",
    "aderencia_ao_tema",
    "praticidade",
    "preocupacao_com_seguranca",
];

/// Serialized in the canonical shape `from_value` reads back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "overall")]
    pub overall_score: f64,
    #[serde(rename = "scores")]
    pub criteria_scores: BTreeMap<String, f64>,
    pub notes: Vec<String>,
    #[serde(rename = "conclusao", skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

/// Where a resolved analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Cache,
    Embedded,
    Service,
}

impl AnalysisResult {
    /// Normalize an analysis JSON value.
    ///
    /// Precedence:
    /// 1. one level of `resultado` / `result` wrapper is unwrapped when it holds an object
    /// 2. the overall score is the first numeric field of `overall`, `score`, else 0
    /// 3. criteria come from the `scores` object; non-numeric entries are skipped
    /// 4. `notes` keeps only string entries
    ///
    /// Returns `None` when the value (after unwrapping) is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = unwrap_result(value).as_object()?;

        let overall_score = OVERALL_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_f64))
            .unwrap_or(0.0);

        let criteria_scores = object
            .get(CRITERIA_KEY)
            .and_then(Value::as_object)
            .map(|scores| {
                scores
                    .iter()
                    .filter_map(|(name, score)| score.as_f64().map(|s| (name.clone(), s)))
                    .collect()
            })
            .unwrap_or_default();

        let notes = object
            .get(NOTES_KEY)
            .and_then(Value::as_array)
            .map(|notes| {
                notes
                    .iter()
                    .filter_map(|n| n.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let conclusion = CONCLUSION_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);

        Some(Self {
            overall_score,
            criteria_scores,
            notes,
            conclusion,
        })
    }

    /// Parse a stored JSON document; unreadable text yields `None`
    pub fn from_json_str(raw: &str) -> Option<Self> {
        serde_json::from_str::<Value>(raw)
            .ok()
            .as_ref()
            .and_then(Self::from_value)
    }

    /// Overall score rounded to the nearest integer (halves round up)
    pub fn rounded_score(&self) -> i64 {
        if self.overall_score.is_finite() {
            (self.overall_score + 0.5).floor() as i64
        } else {
            0
        }
    }

    pub fn conclusion_or_default(&self) -> &str {
        self.conclusion.as_deref().unwrap_or("Analysis completed.")
    }
}

fn unwrap_result(value: &Value) -> &Value {
    WRAPPER_KEYS
        .iter()
        .find_map(|key| value.get(*key).filter(|inner| inner.is_object()))
        .unwrap_or(value)
}

/// Human-readable criterion label: `aderencia_ao_tema` -> `Aderencia Ao Tema`
pub fn criterion_label(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
