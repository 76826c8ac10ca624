//! Axum route handlers for the Evaluation API.

use std::io::Write;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::{evaluate, score_breakdown, EvaluationResult, ScoreBreakdown};
use crate::extraction::{extract_text, DocumentFormat};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_id: Option<u32>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Either `job_id` (a catalog job) or `job_description` (plus optional `job_title`).
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_id: Option<u32>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub candidate_name: Option<String>,
    pub job_id: Option<u32>,
    pub job_title: String,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

impl EvaluationResponse {
    fn new(candidate_name: Option<String>, job: TargetJob, result: EvaluationResult) -> Self {
        Self {
            evaluation_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            candidate_name,
            job_id: job.id,
            job_title: job.title,
            result,
        }
    }
}

/// The job a resume is evaluated against, after resolving a catalog id.
#[derive(Debug, Clone, PartialEq)]
struct TargetJob {
    id: Option<u32>,
    title: String,
    description: String,
}

/// A catalog id wins over free-text fields; otherwise `job_description` is required.
fn resolve_job(
    state: &AppState,
    job_id: Option<u32>,
    job_title: Option<String>,
    job_description: Option<String>,
) -> Result<TargetJob, AppError> {
    if let Some(id) = job_id {
        let job = state
            .jobs
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
        return Ok(TargetJob {
            id: Some(job.id),
            title: job.title.clone(),
            description: job.description.clone(),
        });
    }

    let description = job_description.ok_or_else(|| {
        AppError::Validation("Either job_id or job_description is required.".to_string())
    })?;
    Ok(TargetJob {
        id: None,
        title: job_title.unwrap_or_default(),
        description,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/score
///
/// Score only, no narrative. Empty inputs score 0.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreBreakdown>, AppError> {
    let Json(request) = payload?;
    let job = resolve_job(&state, request.job_id, None, request.job_description)?;

    Ok(Json(score_breakdown(
        &state.weights,
        &request.resume_text,
        &job.description,
    )))
}

/// POST /api/v1/evaluations
///
/// Score plus summary/recommendation for resume text already in hand.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let Json(request) = payload?;
    let job = resolve_job(
        &state,
        request.job_id,
        request.job_title,
        request.job_description,
    )?;

    let result = evaluate(
        &state.weights,
        state.narrator.as_ref(),
        &request.resume_text,
        &job.description,
        &job.title,
    )
    .await;
    info!(
        "Evaluated resume for '{}' (job_id={:?}): score={} backend={:?}",
        job.title, job.id, result.score, result.narrative_backend
    );

    Ok(Json(EvaluationResponse::new(
        non_blank(request.candidate_name),
        job,
        result,
    )))
}

/// POST /api/v1/evaluations/upload
///
/// Multipart form: `resume` (PDF, DOCX or TXT file), then either `job_id` or
/// `job_description` with an optional `job_title`, and an optional `candidate_name`.
/// The file is extracted to text, then evaluated. Unreadable documents evaluate as an
/// empty resume.
pub async fn handle_evaluate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut job_id: Option<u32> = None;
    let mut job_title: Option<String> = None;
    let mut job_description: Option<String> = None;
    let mut candidate_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                upload = Some((file_name, field.bytes().await?));
            }
            "job_id" => {
                let raw = field.text().await?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    job_id = Some(raw.parse().map_err(|_| {
                        AppError::Validation(format!("job_id must be an integer id, got {raw:?}"))
                    })?);
                }
            }
            "job_title" => job_title = Some(field.text().await?),
            "job_description" => job_description = Some(field.text().await?),
            "candidate_name" => candidate_name = non_blank(Some(field.text().await?)),
            _ => {}
        }
    }

    let (file_name, data) = upload
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| AppError::Validation("No resume file provided.".to_string()))?;
    let format = DocumentFormat::from_path(std::path::Path::new(&file_name)).ok_or_else(|| {
        AppError::UnsupportedMediaType("Please upload a PDF, DOCX, or TXT resume.".to_string())
    })?;
    let job = resolve_job(&state, job_id, job_title, job_description)?;

    let resume_text = extract_upload(format, data).await?;
    info!(
        "Extracted {} chars from uploaded {:?} resume",
        resume_text.len(),
        format
    );

    let result = evaluate(
        &state.weights,
        state.narrator.as_ref(),
        &resume_text,
        &job.description,
        &job.title,
    )
    .await;

    Ok(Json(EvaluationResponse::new(candidate_name, job, result)))
}

/// Writes the upload to a temp file and extracts it on the blocking pool.
async fn extract_upload(format: DocumentFormat, data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()
            .context("Failed to create temp file for upload")?;
        file.write_all(&data)
            .context("Failed to write uploaded resume")?;
        file.flush().context("Failed to flush uploaded resume")?;
        Ok(extract_text(file.path()))
    })
    .await
    .context("Extraction task panicked")??;

    Ok(text)
}
