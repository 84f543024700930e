// src/ranking/analysis_flow.rs
//! On-demand analysis of a single answer: reuse what is known, otherwise ask the scoring service

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::services::{AnalysisCache, AnalysisService};
use crate::types::{AnalysisResult, AnalysisSource, Answer};

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnalysis {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
}

pub struct AnalysisFlow<'a, C, S> {
    cache: &'a C,
    service: &'a S,
}

impl<'a, C, S> AnalysisFlow<'a, C, S>
where
    C: AnalysisCache,
    S: AnalysisService,
{
    pub fn new(cache: &'a C, service: &'a S) -> Self {
        Self { cache, service }
    }

    /// Cached result, then the answer's embedded analysis, then a fresh service call.
    ///
    /// A fresh result is written to the cache; a failed cache write is logged and
    /// does not fail the analysis.
    pub async fn resolve(
        &self,
        answer: &Answer,
        question_context: &str,
    ) -> Result<ResolvedAnalysis> {
        if let Some(result) = self.cache.get(&answer.id).await {
            info!("Using cached analysis for answer {}", answer.id);
            return Ok(ResolvedAnalysis {
                result,
                source: AnalysisSource::Cache,
            });
        }

        if let Some(result) = answer.embedded_result() {
            info!("Using embedded analysis for answer {}", answer.id);
            return Ok(ResolvedAnalysis {
                result,
                source: AnalysisSource::Embedded,
            });
        }

        self.analyze_fresh(&answer.id, question_context).await
    }

    /// Always call the scoring service and overwrite the cached entry
    pub async fn analyze_fresh(
        &self,
        answer_id: &str,
        question_context: &str,
    ) -> Result<ResolvedAnalysis> {
        let result = self
            .service
            .analyze(answer_id, question_context)
            .await
            .with_context(|| format!("Could not analyze answer {}", answer_id))?;

        if let Err(e) = self.cache.put(answer_id, &result).await {
            warn!("Failed to cache analysis for answer {}: {:#}", answer_id, e);
        }

        Ok(ResolvedAnalysis {
            result,
            source: AnalysisSource::Service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::fixtures::{analysis, answer, answer_with_embedded, FakeCache, FakeScorer};
    use serde_json::json;

    #[tokio::test]
    async fn test_cache_hit_skips_service() {
        let cache = FakeCache::default();
        cache.insert_raw("A1", r#"{"overall": 91}"#);
        let scorer = FakeScorer::scoring(10.0);

        let flow = AnalysisFlow::new(&cache, &scorer);
        let resolved = flow.resolve(&answer("A1", "Q1", "Ana"), "ctx").await.unwrap();

        assert_eq!(resolved.source, AnalysisSource::Cache);
        assert_eq!(resolved.result.rounded_score(), 91);
        assert_eq!(scorer.calls(), 0);
    }

    #[tokio::test]
    async fn test_embedded_used_before_service() {
        let cache = FakeCache::default();
        let scorer = FakeScorer::scoring(10.0);
        let flow = AnalysisFlow::new(&cache, &scorer);

        let resolved = flow
            .resolve(&answer_with_embedded("A1", "Q1", "Ana", json!({"score": 33})), "ctx")
            .await
            .unwrap();

        assert_eq!(resolved.source, AnalysisSource::Embedded);
        assert_eq!(scorer.calls(), 0);
        assert!(cache.get("A1").await.is_none());
    }

    #[tokio::test]
    async fn test_service_result_is_cached() {
        let cache = FakeCache::default();
        let scorer = FakeScorer::scoring(72.0);
        let flow = AnalysisFlow::new(&cache, &scorer);

        let resolved = flow.resolve(&answer("A1", "Q1", "Ana"), "ctx").await.unwrap();
        assert_eq!(resolved.source, AnalysisSource::Service);
        assert_eq!(cache.get("A1").await, Some(analysis(72.0)));

        let again = flow.resolve(&answer("A1", "Q1", "Ana"), "ctx").await.unwrap();
        assert_eq!(again.source, AnalysisSource::Cache);
        assert_eq!(scorer.calls(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_propagates_and_caches_nothing() {
        let cache = FakeCache::default();
        let scorer = FakeScorer::failing();
        let flow = AnalysisFlow::new(&cache, &scorer);

        assert!(flow.resolve(&answer("A1", "Q1", "Ana"), "ctx").await.is_err());
        assert!(cache.keys().await.is_empty());
    }
}
