//! Narrative generators: pluggable, trait-based source of summary/recommendation text.
//!
//! Default: `TemplateNarrator` (deterministic, no network).
//! Optional: `LlmNarrator` (hosted model), which degrades to the template narrative on
//! any failure so the caller always gets text back.
//!
//! `AppState` holds an `Arc<dyn NarrativeGenerator>`, chosen at startup via config.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::narrative::prompts::{NARRATIVE_PROMPT_TEMPLATE, NARRATIVE_SYSTEM};
use crate::narrative::selector::{build_narrative, Narrative, SelectedNarrative};
use crate::narrative::templates::TemplateBank;

// ────────────────────────────────────────────────────────────────────────────
// Shared data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs of one narrative request.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub job_title: &'a str,
}

/// Which path produced the narrative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeBackend {
    Template,
    Llm,
    /// The model was asked but failed; the template narrative was used instead.
    LlmFallback,
}

/// Narrative text plus the keyword selection behind it.
#[derive(Debug, Clone)]
pub struct GeneratedNarrative {
    pub narrative: Narrative,
    pub backend: NarrativeBackend,
    pub matched_keywords: Vec<String>,
}

/// Tagged result of a hosted-model attempt. Never leaves this module as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    Generated(Narrative),
    Failed { reason: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Swap narrative backends without touching handlers. Implementations must not fail.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest<'_>) -> GeneratedNarrative;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateNarrator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TemplateNarrator {
    bank: Arc<TemplateBank>,
}

impl TemplateNarrator {
    pub fn new(bank: Arc<TemplateBank>) -> Self {
        Self { bank }
    }

    pub fn narrate(&self, request: &NarrativeRequest<'_>) -> SelectedNarrative {
        let selected = build_narrative(
            &self.bank,
            request.resume_text,
            request.job_description,
            request.job_title,
        );
        debug!(
            "Template narrative: tier={:?} variant={} keywords={:?} fallback={}",
            selected.tier, selected.variant, selected.matched_keywords, selected.keyword_fallback
        );
        selected
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrator {
    async fn generate(&self, request: &NarrativeRequest<'_>) -> GeneratedNarrative {
        let selected = self.narrate(request);
        GeneratedNarrative {
            narrative: selected.narrative,
            backend: NarrativeBackend::Template,
            matched_keywords: selected.matched_keywords,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmNarrator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmNarrator {
    llm: LlmClient,
    fallback: TemplateNarrator,
}

impl LlmNarrator {
    pub fn new(llm: LlmClient, fallback: TemplateNarrator) -> Self {
        Self { llm, fallback }
    }

    /// One hosted-model attempt, folded into a tagged outcome.
    pub async fn attempt(&self, request: &NarrativeRequest<'_>) -> NarrativeOutcome {
        let prompt = build_prompt(request);
        let system = format!("{NARRATIVE_SYSTEM} {JSON_ONLY_SYSTEM}");

        match self.llm.call_json::<Narrative>(&prompt, &system).await {
            Ok(narrative) => validate_generated(narrative),
            Err(e) => NarrativeOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl NarrativeGenerator for LlmNarrator {
    async fn generate(&self, request: &NarrativeRequest<'_>) -> GeneratedNarrative {
        let selected = self.fallback.narrate(request);

        match self.attempt(request).await {
            NarrativeOutcome::Generated(narrative) => GeneratedNarrative {
                narrative,
                backend: NarrativeBackend::Llm,
                matched_keywords: selected.matched_keywords,
            },
            NarrativeOutcome::Failed { reason } => {
                warn!("LLM narrative failed, using template narrative: {reason}");
                GeneratedNarrative {
                    narrative: selected.narrative,
                    backend: NarrativeBackend::LlmFallback,
                    matched_keywords: selected.matched_keywords,
                }
            }
        }
    }
}

fn build_prompt(request: &NarrativeRequest<'_>) -> String {
    NARRATIVE_PROMPT_TEMPLATE
        .replace("{job_title}", request.job_title)
        .replace("{job_description}", request.job_description)
        .replace("{resume_text}", request.resume_text)
}

/// A reply with a blank field counts as a failure.
fn validate_generated(narrative: Narrative) -> NarrativeOutcome {
    if narrative.summary.trim().is_empty() {
        return NarrativeOutcome::Failed {
            reason: "model returned an empty summary".to_string(),
        };
    }
    if narrative.recommendation.trim().is_empty() {
        return NarrativeOutcome::Failed {
            reason: "model returned an empty recommendation".to_string(),
        };
    }
    NarrativeOutcome::Generated(narrative)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Looking for a Python developer with Flask and SQL experience";
    const RESUME: &str = "Experienced Python engineer who has built Flask APIs";

    fn request() -> NarrativeRequest<'static> {
        NarrativeRequest {
            resume_text: RESUME,
            job_description: JOB,
            job_title: "Backend Developer",
        }
    }

    fn template_narrator() -> TemplateNarrator {
        TemplateNarrator::new(Arc::new(TemplateBank::standard().unwrap()))
    }

    #[tokio::test]
    async fn test_template_narrator_reports_template_backend() {
        let generated = template_narrator().generate(&request()).await;
        assert_eq!(generated.backend, NarrativeBackend::Template);
        assert_eq!(generated.matched_keywords, vec!["python", "flask"]);
        assert!(generated.narrative.summary.contains("**python**"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_llm_narrator_falls_back_when_endpoint_unreachable() {
        let llm = LlmClient::with_endpoint(
            "test-key".to_string(),
            "http://127.0.0.1:9/v1/messages".to_string(),
        )
        .unwrap();
        let narrator = LlmNarrator::new(llm, template_narrator());

        let generated = narrator.generate(&request()).await;
        let expected = template_narrator().generate(&request()).await;

        assert_eq!(generated.backend, NarrativeBackend::LlmFallback);
        assert_eq!(generated.narrative, expected.narrative);
    }

    #[test]
    fn test_prompt_includes_all_inputs() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Job Title: Backend Developer"));
        assert!(prompt.contains(JOB));
        assert!(prompt.contains(RESUME));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_blank_model_reply_is_a_failure() {
        let outcome = validate_generated(Narrative {
            summary: "  ".to_string(),
            recommendation: "Add metrics".to_string(),
        });
        assert!(matches!(outcome, NarrativeOutcome::Failed { .. }));
    }

    #[test]
    fn test_complete_model_reply_is_generated() {
        let narrative = Narrative {
            summary: "Good fit".to_string(),
            recommendation: "Add metrics".to_string(),
        };
        assert_eq!(
            validate_generated(narrative.clone()),
            NarrativeOutcome::Generated(narrative)
        );
    }
}
