//! Narrative Selector: deterministic summary/recommendation text from matched keywords.
//!
//! Flow: top_keywords(job) → matched_keywords(resume) → tier + variant →
//!       slot substitution → keyword highlighting.

use regex::{escape, Regex};
use serde::Deserialize;

use crate::narrative::keywords::{
    match_keywords, top_keywords, KeywordMatches, DEFAULT_TOP_KEYWORDS,
};
use crate::narrative::templates::{SlotValues, TemplateBank, Tier};

/// Keyword sample used when the job description yields no keywords at all.
pub const GENERIC_KEYWORD_SAMPLE: &str = "the core requirements";

/// Job title used when the caller supplies an empty one.
pub const GENERIC_JOB_TITLE: &str = "this role";

/// Emphasis marker wrapped around matched keywords for downstream rendering.
pub const EMPHASIS_MARKER: &str = "**";

/// Summary and recommendation text for one evaluation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Narrative {
    pub summary: String,
    pub recommendation: String,
}

/// A template narrative plus how it was chosen.
#[derive(Debug, Clone)]
pub struct SelectedNarrative {
    pub narrative: Narrative,
    pub tier: Tier,
    pub variant: usize,
    pub matched_keywords: Vec<String>,
    pub keyword_fallback: bool,
}

/// Renders the narrative for `matches` and `job_title`.
///
/// The tier and variant come from the genuine match count; the keyword sample and
/// highlighting use the (possibly fallback) keyword list.
pub fn select_narrative(
    bank: &TemplateBank,
    matches: &KeywordMatches,
    job_title: &str,
) -> SelectedNarrative {
    let matched = &matches.keywords;
    let sample = if matched.is_empty() {
        GENERIC_KEYWORD_SAMPLE.to_string()
    } else {
        matched.join(", ")
    };
    let job_title = match job_title.trim() {
        "" => GENERIC_JOB_TITLE,
        title => title,
    };

    let pair = bank.select(matches.match_count());
    let values = SlotValues {
        keywords: &sample,
        job_title,
    };

    let summary = highlight_keywords(&pair.summary.render(values), matched);
    let recommendation = highlight_keywords(&pair.recommendation.render(values), matched);

    SelectedNarrative {
        narrative: Narrative {
            summary,
            recommendation,
        },
        tier: pair.tier,
        variant: pair.variant,
        matched_keywords: matched.clone(),
        keyword_fallback: matches.fallback,
    }
}

/// Wraps every whole-word, case-insensitive occurrence of each keyword in
/// `EMPHASIS_MARKER`.
///
/// All keywords go into one alternation (longest first) and are replaced in a single
/// pass, so an already highlighted span is never wrapped twice.
pub fn highlight_keywords(text: &str, keywords: &[String]) -> String {
    let mut terms: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if terms.is_empty() {
        return text.to_string();
    }
    terms.sort_by(|a, b| b.len().cmp(&a.len()));
    terms.dedup();

    let alternation = terms.iter().map(|t| escape(t)).collect::<Vec<_>>().join("|");
    let re = match Regex::new(&format!(r"(?i)\b(?:{alternation})\b")) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Keyword highlight pattern rejected: {e}");
            return text.to_string();
        }
    };
    re.replace_all(text, |caps: &regex::Captures<'_>| {
        format!("{EMPHASIS_MARKER}{}{EMPHASIS_MARKER}", &caps[0])
    })
    .into_owned()
}

/// Full template pipeline from the two input texts and a job title.
pub fn build_narrative(
    bank: &TemplateBank,
    resume_text: &str,
    job_description: &str,
    job_title: &str,
) -> SelectedNarrative {
    let top = top_keywords(job_description, DEFAULT_TOP_KEYWORDS);
    let matches = match_keywords(&top, resume_text);
    select_narrative(bank, &matches, job_title)
}
