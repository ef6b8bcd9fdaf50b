use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::service::{
    embed, initial_stage, initial_timeline, score_application, ApplicationView,
};
use crate::applications::store::{self, NewApplication};
use crate::candidates::store::get_candidate;
use crate::errors::{conflict_on_unique, AppError};
use crate::jobs::store::get_job;
use crate::models::application::ApplicationRow;
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
}

/// POST /api/v1/applications/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationRow>>), AppError> {
    let job = get_job(&state.db, req.job_id).await?;
    let candidate = get_candidate(&state.db, req.candidate_id).await?;
    let (Some(job), Some(candidate)) = (job, candidate) else {
        return Err(AppError::NotFound("Job or Candidate not found".into()));
    };

    let now = Utc::now();
    let matching_score = score_application(&candidate, &job, now);
    info!(
        "Candidate {} scored {} for job {}",
        candidate.id, matching_score.overall, job.id
    );

    let application = store::insert_application(
        &state.db,
        NewApplication {
            id: Uuid::new_v4(),
            job_id: job.id,
            candidate_id: candidate.id,
            current_stage: &initial_stage(&job.posting.0, now),
            timeline: &initial_timeline(now),
            matching_score: &matching_score,
        },
    )
    .await
    .map_err(|e| conflict_on_unique(e, "Candidate has already applied to this job"))?;

    Ok((StatusCode::CREATED, ApiResponse::ok(application)))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApplicationView>>>, AppError> {
    let applications = store::list_applications(&state.db).await?;
    let candidate_ids: Vec<Uuid> = applications.iter().map(|a| a.candidate_id).collect();
    let job_ids: Vec<Uuid> = applications.iter().map(|a| a.job_id).collect();

    let candidates = store::candidates_by_ids(&state.db, &candidate_ids).await?;
    let jobs = store::jobs_by_ids(&state.db, &job_ids).await?;
    Ok(ApiResponse::counted(embed(applications, candidates, jobs)))
}

/// GET /api/v1/applications/job/:job_id
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ApplicationView>>>, AppError> {
    let applications = store::list_for_job(&state.db, job_id).await?;
    let candidate_ids: Vec<Uuid> = applications.iter().map(|a| a.candidate_id).collect();

    let candidates = store::candidates_by_ids(&state.db, &candidate_ids).await?;
    Ok(ApiResponse::counted(embed(applications, candidates, Vec::new())))
}
