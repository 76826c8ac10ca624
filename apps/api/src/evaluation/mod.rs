// Evaluation: score + narrative for one (resume, job) pair.
// The only place where the scoring core and the narrative source meet.

pub mod handlers;

use serde::Serialize;
use tracing::debug;

use crate::narrative::generator::{NarrativeBackend, NarrativeGenerator, NarrativeRequest};
use crate::scoring::scorer::{keyword_score, normalize_score};
use crate::scoring::weights::KeywordWeights;

/// Raw and normalized score of one resume against one job description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: u8,
    pub raw_score: f64,
}

/// Output contract of an evaluation, independent of any transport or storage.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub summary: String,
    pub recommendation: String,
    pub matched_keywords: Vec<String>,
    pub narrative_backend: NarrativeBackend,
}

pub fn score_breakdown(
    weights: &KeywordWeights,
    resume_text: &str,
    job_desc: &str,
) -> ScoreBreakdown {
    let raw_score = keyword_score(weights, resume_text, job_desc);
    ScoreBreakdown {
        score: normalize_score(raw_score),
        raw_score,
    }
}

/// Scores the resume and asks `narrator` for the summary/recommendation text.
///
/// Never fails: empty inputs score 0 and still produce a narrative.
pub async fn evaluate(
    weights: &KeywordWeights,
    narrator: &dyn NarrativeGenerator,
    resume_text: &str,
    job_description: &str,
    job_title: &str,
) -> EvaluationResult {
    let breakdown = score_breakdown(weights, resume_text, job_description);
    debug!(
        "Scored resume ({} chars) against '{}': raw={:.4} score={}",
        resume_text.len(),
        job_title,
        breakdown.raw_score,
        breakdown.score
    );

    let generated = narrator
        .generate(&NarrativeRequest {
            resume_text,
            job_description,
            job_title,
        })
        .await;

    EvaluationResult {
        score: breakdown.score,
        summary: generated.narrative.summary,
        recommendation: generated.narrative.recommendation,
        matched_keywords: generated.matched_keywords,
        narrative_backend: generated.backend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::narrative::generator::TemplateNarrator;
    use crate::narrative::templates::TemplateBank;
    use crate::scoring::scorer::score_resume;

    const JOB: &str = "Looking for a Python developer with Flask and SQL experience";
    const RESUME: &str = "Experienced Python engineer who has built Flask APIs";

    fn narrator() -> TemplateNarrator {
        TemplateNarrator::new(Arc::new(TemplateBank::standard().unwrap()))
    }

    #[tokio::test]
    async fn test_evaluate_combines_score_and_narrative() {
        let weights = KeywordWeights::default();
        let result = evaluate(&weights, &narrator(), RESUME, JOB, "Backend Developer").await;
        assert_eq!(result.score, 40);
        assert_eq!(result.matched_keywords, vec!["python", "flask"]);
        assert_eq!(result.narrative_backend, NarrativeBackend::Template);
        assert!(result.summary.contains("**python**, **flask**"));
    }

    #[tokio::test]
    async fn test_evaluate_empty_job_description() {
        let weights = KeywordWeights::default();
        let result = evaluate(&weights, &narrator(), RESUME, "", "Backend Developer").await;
        assert_eq!(result.score, 0);
        assert!(!result.summary.is_empty());
        assert!(!result.recommendation.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_empty_resume() {
        let weights = KeywordWeights::default();
        let result = evaluate(&weights, &narrator(), "", JOB, "Backend Developer").await;
        assert_eq!(result.score, 0);
        assert_eq!(result.matched_keywords, vec!["looking", "python", "developer"]);
    }

    #[test]
    fn test_score_breakdown_matches_raw_and_normalized() {
        let weights = KeywordWeights::default();
        let breakdown = score_breakdown(&weights, RESUME, JOB);
        assert_eq!(breakdown.score, normalize_score(breakdown.raw_score));
        assert!(breakdown.raw_score > 0.0);
    }

    #[test]
    fn test_score_breakdown_agrees_with_score_resume() {
        let breakdown = score_breakdown(&KeywordWeights::default(), RESUME, JOB);
        assert_eq!(breakdown.score, score_resume(RESUME, JOB));
        assert_eq!(score_breakdown(&KeywordWeights::default(), "", JOB).score, 0);
    }
}
