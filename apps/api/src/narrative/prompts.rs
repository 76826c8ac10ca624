/// Recruiter persona for the hosted-model narrative.
pub const NARRATIVE_SYSTEM: &str =
    "You are a precise, helpful technical recruiter. Be concise, structured, and pragmatic.";

/// Narrative prompt. Placeholders: {job_title}, {job_description}, {resume_text}.
pub const NARRATIVE_PROMPT_TEMPLATE: &str = r#"Job Title: {job_title}

Job Description:
{job_description}

Resume:
{resume_text}

Assess how well this resume fits the job.

Return a JSON object with exactly two string fields:
- "summary": a 4-6 bullet executive summary of the candidate's fit, followed by an overall
  fit rating out of 10 with a one-line rationale.
- "recommendation": the top missing skills or keywords relative to the job, then 5-7
  concrete resume improvements tailored to this job.
"#;
