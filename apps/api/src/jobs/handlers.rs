use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::candidates::store::latest_parsed_candidate;
use crate::errors::{conflict_on_unique, AppError};
use crate::jobs::store;
use crate::jobs::suggest::{normalize_district, rank_jobs, SuggestedJob, DEFAULT_SUGGESTION_LIMIT};
use crate::models::job::{JobPosting, JobRow, JobStatus};
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestedQuery {
    pub district: Option<String>,
    pub limit: Option<usize>,
}

/// Validates a new posting and fills in the generated job code and default status.
pub fn prepare_posting(mut posting: JobPosting) -> Result<JobPosting, AppError> {
    if posting.title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".into()));
    }
    if posting.description.trim().is_empty() {
        return Err(AppError::Validation("Job description is required".into()));
    }
    if posting
        .job_code
        .as_deref()
        .map_or(true, |c| c.trim().is_empty())
    {
        posting.job_code = Some(format!("JOB-{}", Utc::now().timestamp_millis()));
    }
    if posting.status.is_none() {
        posting.status = Some(JobStatus::Open);
    }
    Ok(posting)
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(posting): Json<JobPosting>,
) -> Result<(StatusCode, Json<ApiResponse<JobRow>>), AppError> {
    let posting = prepare_posting(posting)?;
    let job = store::insert_job(&state.db, Uuid::new_v4(), &posting)
        .await
        .map_err(|e| conflict_on_unique(e, "A job with this job code already exists"))?;

    info!("Job created: {} ({})", job.id, job.job_code);
    Ok((StatusCode::CREATED, ApiResponse::ok(job)))
}

/// GET /api/v1/jobs/suggested
/// Ranks open postings against the most recently parsed résumé.
pub async fn handle_suggested_jobs(
    State(state): State<AppState>,
    Query(params): Query<SuggestedQuery>,
) -> Result<Json<ApiResponse<Vec<SuggestedJob>>>, AppError> {
    let district = normalize_district(params.district.as_deref());
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    info!("Getting jobs for district: {}", district.unwrap_or("All"));

    let candidate = latest_parsed_candidate(&state.db).await?;
    let jobs = store::list_open_jobs(&state.db, district).await?;
    info!("Found {} open jobs", jobs.len());

    if let Some(c) = &candidate {
        info!("Calculating matches for candidate {}", c.id);
    }
    let ranked = rank_jobs(jobs, candidate.as_ref().map(|c| &c.profile.0), limit);
    Ok(ApiResponse::counted(ranked))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobRow>>, AppError> {
    let job = store::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(ApiResponse::ok(job))
}

/// DELETE /api/v1/jobs/clear
pub async fn handle_clear_jobs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let deleted = store::clear_jobs(&state.db).await?;
    info!("Cleared {deleted} jobs");
    Ok(ApiResponse::ok(json!({ "deleted": deleted })))
}
