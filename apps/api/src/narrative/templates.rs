//! Narrative templates: structured text with named slots, grouped into tiers.
//!
//! A template is parsed once into literal and slot segments. Both `{keywords}` and
//! `{job_title}` must be present, and any other `{...}` is rejected, so a bad template
//! is a construction error at startup instead of a silent blank at request time.

use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Slots and templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Keywords,
    JobTitle,
}

impl Slot {
    const ALL: [Slot; 2] = [Slot::Keywords, Slot::JobTitle];

    fn name(self) -> &'static str {
        match self {
            Slot::Keywords => "keywords",
            Slot::JobTitle => "job_title",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template is missing the {{{0}}} slot: {1:?}")]
    MissingSlot(&'static str, String),

    #[error("template uses unknown slot {{{0}}}: {1:?}")]
    UnknownSlot(String, String),

    #[error("template has an unclosed brace: {0:?}")]
    UnclosedBrace(String),

    #[error("tier {tier:?} needs matching non-empty summary and recommendation pools (got {summaries} and {recommendations})")]
    UnbalancedTier {
        tier: Tier,
        summaries: usize,
        recommendations: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// Values substituted into a template's slots.
#[derive(Debug, Clone, Copy)]
pub struct SlotValues<'a> {
    pub keywords: &'a str,
    pub job_title: &'a str,
}

impl SlotValues<'_> {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Keywords => self.keywords,
            Slot::JobTitle => self.job_title,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeTemplate {
    segments: Vec<Segment>,
}

impl NarrativeTemplate {
    /// Parses `text`, validating that every slot is known and present.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| TemplateError::UnclosedBrace(text.to_string()))?;
            let name = &after[..close];
            let slot = Slot::from_name(name)
                .ok_or_else(|| TemplateError::UnknownSlot(name.to_string(), text.to_string()))?;
            segments.push(Segment::Slot(slot));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        for slot in Slot::ALL {
            if !segments.contains(&Segment::Slot(slot)) {
                return Err(TemplateError::MissingSlot(slot.name(), text.to_string()));
            }
        }

        Ok(Self { segments })
    }

    pub fn render(&self, values: SlotValues<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(values.get(*slot)),
            }
        }
        out
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tiers and the bank
// ────────────────────────────────────────────────────────────────────────────

/// Tone bucket chosen from the matched-keyword count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 0–2 matches: tentative, potential-focused framing.
    Low,
    /// 3–5 matches: solid-alignment framing.
    Medium,
    /// 6+ matches: strong-expertise framing.
    High,
}

impl Tier {
    pub fn for_match_count(count: usize) -> Self {
        match count {
            0..=2 => Tier::Low,
            3..=5 => Tier::Medium,
            _ => Tier::High,
        }
    }

    /// Smallest match count that lands in this tier.
    pub fn floor(self) -> usize {
        match self {
            Tier::Low => 0,
            Tier::Medium => 3,
            Tier::High => 6,
        }
    }
}

#[derive(Debug, Clone)]
struct TierPool {
    summaries: Vec<NarrativeTemplate>,
    recommendations: Vec<NarrativeTemplate>,
}

impl TierPool {
    fn parse(
        tier: Tier,
        summaries: &[&str],
        recommendations: &[&str],
    ) -> Result<Self, TemplateError> {
        if summaries.is_empty() || summaries.len() != recommendations.len() {
            return Err(TemplateError::UnbalancedTier {
                tier,
                summaries: summaries.len(),
                recommendations: recommendations.len(),
            });
        }
        Ok(Self {
            summaries: summaries
                .iter()
                .map(|t| NarrativeTemplate::parse(t))
                .collect::<Result<_, _>>()?,
            recommendations: recommendations
                .iter()
                .map(|t| NarrativeTemplate::parse(t))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Parallel summary/recommendation templates for every tier.
///
/// Immutable once built; shared read-only across evaluations.
#[derive(Debug, Clone)]
pub struct TemplateBank {
    low: TierPool,
    medium: TierPool,
    high: TierPool,
}

/// Summary and recommendation templates picked for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePair<'a> {
    pub tier: Tier,
    pub variant: usize,
    pub summary: &'a NarrativeTemplate,
    pub recommendation: &'a NarrativeTemplate,
}

const LOW_SUMMARIES: &[&str] = &[
    "The resume shows early signs of fit for the {job_title} role, with some exposure to {keywords}.",
    "There is potential here for the {job_title} position: the resume touches on {keywords}, though the overlap is limited.",
    "The candidate could grow into the {job_title} role; {keywords} appear in the resume but the match is thin.",
];

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Expand on hands-on work with {keywords} and mirror the wording of the {job_title} posting so applicant tracking systems pick it up.",
    "Add measurable outcomes to bullets involving {keywords} and move the experience most relevant to {job_title} to the top.",
    "Consider a short project or certification around {keywords} to strengthen the case for {job_title}.",
];

const MEDIUM_SUMMARIES: &[&str] = &[
    "The resume aligns solidly with the {job_title} role, covering {keywords}.",
    "A good match for {job_title}: the candidate demonstrates working experience with {keywords}.",
    "The candidate's background fits the {job_title} requirements well, with clear evidence of {keywords}.",
];

const MEDIUM_RECOMMENDATIONS: &[&str] = &[
    "Quantify the impact of work with {keywords} and tailor the summary line toward {job_title}.",
    "Group the {keywords} experience into a focused skills section and lead with the achievements closest to {job_title}.",
    "Call out project scale and results for {keywords} to move from a good to a strong {job_title} candidate.",
];

const HIGH_SUMMARIES: &[&str] = &[
    "Strong fit for the {job_title} role: the resume demonstrates deep expertise across {keywords}.",
    "An excellent match for {job_title}, with extensive, well-evidenced experience in {keywords}.",
    "The candidate brings proven expertise in {keywords}, closely matching what the {job_title} position asks for.",
];

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "Keep the resume concise; lead with senior-level outcomes using {keywords} that map directly to {job_title}.",
    "Highlight leadership and ownership around {keywords} to stand out among strong {job_title} applicants.",
    "Prepare concrete stories about {keywords} for interviews; the written fit for {job_title} is already strong.",
];

impl TemplateBank {
    /// Builds the standard bank, validating every template.
    pub fn standard() -> Result<Self, TemplateError> {
        Self::from_text(
            (LOW_SUMMARIES, LOW_RECOMMENDATIONS),
            (MEDIUM_SUMMARIES, MEDIUM_RECOMMENDATIONS),
            (HIGH_SUMMARIES, HIGH_RECOMMENDATIONS),
        )
    }

    /// Builds a bank from custom template text, one (summaries, recommendations) pair per tier.
    pub fn from_text(
        low: (&[&str], &[&str]),
        medium: (&[&str], &[&str]),
        high: (&[&str], &[&str]),
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            low: TierPool::parse(Tier::Low, low.0, low.1)?,
            medium: TierPool::parse(Tier::Medium, medium.0, medium.1)?,
            high: TierPool::parse(Tier::High, high.0, high.1)?,
        })
    }

    fn pool(&self, tier: Tier) -> &TierPool {
        match tier {
            Tier::Low => &self.low,
            Tier::Medium => &self.medium,
            Tier::High => &self.high,
        }
    }

    /// Picks the template pair for `match_count` matched keywords.
    ///
    /// The tier comes from the count; the variant inside the tier is
    /// `(match_count - tier.floor()) % pool_len`, so consecutive counts cycle through
    /// the alternate phrasings.
    pub fn select(&self, match_count: usize) -> TemplatePair<'_> {
        let tier = Tier::for_match_count(match_count);
        let pool = self.pool(tier);
        let variant = (match_count - tier.floor()) % pool.summaries.len();
        TemplatePair {
            tier,
            variant,
            summary: &pool.summaries[variant],
            recommendation: &pool.recommendations[variant],
        }
    }
}
