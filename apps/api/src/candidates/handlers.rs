use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::ats;
use crate::candidates::ingest::{ingest_batch, ingest_resume, BulkIngestReport, ResumeUpload};
use crate::candidates::store;
use crate::errors::AppError;
use crate::models::candidate::{CandidateProfile, CandidateRow};
use crate::resume::parser::apply_identity_defaults;
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Reads every file part named `field` from a multipart body, up to `max` files.
async fn read_files(
    multipart: &mut Multipart,
    field: &str,
    max: usize,
) -> Result<Vec<ResumeUpload>, AppError> {
    let mut uploads = Vec::new();

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if part.name() != Some(field) {
            continue;
        }
        if uploads.len() == max {
            return Err(AppError::Validation(format!(
                "Too many files; at most {max} may be uploaded at once"
            )));
        }
        let filename = part.file_name().unwrap_or("resume").to_string();
        let content_type = part.content_type().map(str::to_string);
        let bytes = part
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file '{filename}': {e}")))?;
        uploads.push(ResumeUpload {
            filename,
            content_type,
            bytes,
        });
    }

    Ok(uploads)
}

/// POST /api/v1/candidates/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CandidateRow>>), AppError> {
    let upload = read_files(&mut multipart, "resume", 1)
        .await?
        .pop()
        .ok_or_else(|| AppError::Validation("Please upload a resume file".into()))?;

    let candidate = ingest_resume(&state, upload).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(candidate)))
}

/// POST /api/v1/candidates/bulk
pub async fn handle_bulk_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<BulkIngestReport>>, AppError> {
    let uploads = read_files(&mut multipart, "resumes", state.config.max_bulk_upload).await?;
    if uploads.is_empty() {
        return Err(AppError::Validation("Please upload resume files".into()));
    }

    info!("Bulk upload start: {} files", uploads.len());
    let report = ingest_batch(&state, uploads).await;
    Ok(ApiResponse::ok(report))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CandidateRow>>>, AppError> {
    let candidates = store::list_candidates(&state.db, None).await?;
    Ok(ApiResponse::counted(candidates))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CandidateRow>>, AppError> {
    let candidate = store::get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| candidate_not_found(id))?;
    Ok(ApiResponse::ok(candidate))
}

/// PUT /api/v1/candidates/:id
/// Replaces the profile; the ATS score is recomputed from the new profile.
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(mut profile): Json<CandidateProfile>,
) -> Result<Json<ApiResponse<CandidateRow>>, AppError> {
    apply_identity_defaults(&mut profile);
    let report = ats::analyze(&profile);

    let candidate = store::update_candidate(&state.db, id, &profile, &report)
        .await?
        .ok_or_else(|| candidate_not_found(id))?;
    info!("Candidate {id} updated (ATS {})", report.score);
    Ok(ApiResponse::ok(candidate))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    if !store::delete_candidate(&state.db, id).await? {
        return Err(candidate_not_found(id));
    }
    info!("Candidate {id} deleted");
    Ok(ApiResponse::ok(json!({})))
}

fn candidate_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Candidate {id} not found"))
}
