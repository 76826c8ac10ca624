//! Keyword-overlap scorer.
//!
//! raw = Σ weight(token) over (resume ∩ job) / (|job| + ε)
//! score = round(100 × min(1, raw × SCORE_SCALE) ^ SCORE_EXPONENT)
//!
//! `SCORE_SCALE` and `SCORE_EXPONENT` are the calibration knobs for the whole
//! score distribution.

use crate::scoring::tokenizer::token_set;
use crate::scoring::weights::KeywordWeights;

/// Added to the job vocabulary size so the denominator is never exactly zero.
pub const DENOMINATOR_EPSILON: f64 = 1e-6;

/// Multiplier applied to the raw overlap before clamping to [0, 1].
pub const SCORE_SCALE: f64 = 1.2;

/// Sub-linear compression applied after clamping. Values below 1 narrow the spread
/// between high scores.
pub const SCORE_EXPONENT: f64 = 0.9;

/// Weighted keyword overlap between a resume and a job description.
///
/// Returns 0.0 when the job description has no tokens.
pub fn keyword_score(weights: &KeywordWeights, resume_text: &str, job_desc: &str) -> f64 {
    let job_tokens = token_set(job_desc);
    if job_tokens.is_empty() {
        return 0.0;
    }
    let resume_tokens = token_set(resume_text);

    let overlap_weight: f64 = resume_tokens
        .intersection(&job_tokens)
        .map(|token| weights.weight_of(token))
        .sum();

    overlap_weight / (job_tokens.len() as f64 + DENOMINATOR_EPSILON)
}

/// Maps a raw overlap score onto an integer percentage in [0, 100].
///
/// Monotonically non-decreasing in `raw`. Negative and NaN inputs map to 0.
pub fn normalize_score(raw: f64) -> u8 {
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    let scaled = (raw * SCORE_SCALE).min(1.0);
    let compressed = scaled.powf(SCORE_EXPONENT);
    (compressed * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Scores a resume against a job description using the standard weight table.
pub fn score_resume(resume_text: &str, job_desc: &str) -> u8 {
    score_resume_with(&KeywordWeights::default(), resume_text, job_desc)
}

/// Scores a resume against a job description with an injected weight table.
pub fn score_resume_with(weights: &KeywordWeights, resume_text: &str, job_desc: &str) -> u8 {
    normalize_score(keyword_score(weights, resume_text, job_desc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Looking for a Python developer with Flask and SQL experience";
    const RESUME: &str = "Experienced Python engineer who has built Flask APIs";

    #[test]
    fn test_empty_job_scores_zero() {
        let w = KeywordWeights::default();
        assert_eq!(keyword_score(&w, "", ""), 0.0);
        assert_eq!(keyword_score(&w, RESUME, ""), 0.0);
        assert_eq!(keyword_score(&w, RESUME, "123 456 !!"), 0.0);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let w = KeywordWeights::default();
        assert_eq!(keyword_score(&w, "", JOB), 0.0);
        assert_eq!(score_resume("", JOB), 0);
    }

    #[test]
    fn test_raw_score_is_weighted_overlap_fraction() {
        let w = KeywordWeights::default();
        // 10 distinct job tokens; python + flask overlap, both tech terms (1.5 each)
        let raw = keyword_score(&w, RESUME, JOB);
        assert!((raw - 3.0 / 10.0).abs() < 1e-5, "raw was {raw}");
    }

    #[test]
    fn test_end_to_end_score_is_stable() {
        assert_eq!(score_resume(RESUME, JOB), 40);
        assert_eq!(score_resume(RESUME, JOB), score_resume(RESUME, JOB));
    }

    #[test]
    fn test_ordinary_overlap_weighs_less_than_tech_overlap() {
        let w = KeywordWeights::default();
        let tech = keyword_score(&w, "python", "python developer");
        let ordinary = keyword_score(&w, "developer", "python developer");
        assert!(tech > ordinary);
    }

    #[test]
    fn test_adding_job_word_never_decreases_score() {
        let w = KeywordWeights::default();
        let before = keyword_score(&w, RESUME, JOB);
        let after = keyword_score(&w, &format!("{RESUME} sql"), JOB);
        assert!(after >= before);
        let after_ordinary = keyword_score(&w, &format!("{RESUME} looking"), JOB);
        assert!(after_ordinary >= before);
    }

    #[test]
    fn test_score_is_non_negative() {
        let w = KeywordWeights::default();
        for (r, j) in [("", "a"), ("x", "y"), (RESUME, JOB), ("c++ c#", "c++")] {
            assert!(keyword_score(&w, r, j) >= 0.0);
        }
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(normalize_score(0.0), 0);
        assert_eq!(normalize_score(-3.0), 0);
        assert_eq!(normalize_score(f64::NAN), 0);
    }

    #[test]
    fn test_normalize_saturates_at_100() {
        assert_eq!(normalize_score(1.0 / SCORE_SCALE), 100);
        assert_eq!(normalize_score(5.0), 100);
        assert_eq!(normalize_score(f64::INFINITY), 100);
    }

    #[test]
    fn test_normalize_is_monotonic_and_bounded() {
        let mut previous = 0;
        for step in 0..=200 {
            let raw = step as f64 / 100.0;
            let score = normalize_score(raw);
            assert!(score <= 100);
            assert!(score >= previous, "score dropped at raw={raw}");
            previous = score;
        }
    }

    #[test]
    fn test_full_overlap_saturates() {
        assert_eq!(score_resume(JOB, JOB), 100);
    }

    #[test]
    fn test_injected_weights_change_raw_score() {
        let heavy = KeywordWeights::new(["developer"], 3.0, 1.0);
        let standard = KeywordWeights::default();
        let resume = "developer";
        assert!(keyword_score(&heavy, resume, JOB) > keyword_score(&standard, resume, JOB));
    }
}
