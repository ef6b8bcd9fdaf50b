use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ats;
use crate::candidates::store::{insert_candidate, NewCandidate};
use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::resume::extract::{classify, extract_text};
use crate::state::AppState;

/// One uploaded résumé file, already read out of the multipart body.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct BulkSuccess {
    pub filename: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BulkFailure {
    pub filename: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BulkIngestReport {
    pub success: Vec<BulkSuccess>,
    pub failed: Vec<BulkFailure>,
}

/// Full intake pipeline for one file:
/// extract text → parse → ATS score → store raw file in S3 → insert candidate.
pub async fn ingest_resume(state: &AppState, upload: ResumeUpload) -> Result<CandidateRow, AppError> {
    info!(
        "Ingesting resume '{}' ({} bytes, {:?})",
        upload.filename,
        upload.bytes.len(),
        upload.content_type
    );

    let kind = classify(upload.content_type.as_deref(), &upload.filename)?;
    let bytes = upload.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    let parsed = state.resume_parser.parse(&text).await?;
    let report = ats::analyze(&parsed.profile);
    info!(
        "Parsed '{}' as {} (ATS {})",
        upload.filename,
        parsed.profile.display_name(),
        report.score
    );

    let id = Uuid::new_v4();
    let s3_key = resume_key(id, &upload.filename);
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(upload.bytes))
        .content_type(
            upload
                .content_type
                .as_deref()
                .unwrap_or("application/octet-stream"),
        )
        .send()
        .await
        .map_err(|e| AppError::S3(format!("upload of {s3_key} failed: {e}")))?;

    let candidate = insert_candidate(
        &state.db,
        NewCandidate {
            id,
            profile: &parsed.profile,
            resume_filename: &upload.filename,
            resume_s3_key: &s3_key,
            parsed_resume: &parsed.raw,
            ats: &report,
        },
    )
    .await?;

    info!("Candidate created: {} (s3://{}/{})", candidate.id, state.config.s3_bucket, s3_key);
    Ok(candidate)
}

/// Runs the pipeline over each file in order; one failure never aborts the batch.
pub async fn ingest_batch(state: &AppState, uploads: Vec<ResumeUpload>) -> BulkIngestReport {
    let mut report = BulkIngestReport::default();

    for upload in uploads {
        let filename = upload.filename.clone();
        match ingest_resume(state, upload).await {
            Ok(candidate) => {
                info!("Successfully ingested: {filename}");
                report.success.push(BulkSuccess {
                    filename,
                    id: candidate.id,
                });
            }
            Err(e) => {
                warn!("Failed to ingest {filename}: {e}");
                report.failed.push(BulkFailure {
                    filename,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Bulk ingest finished: {} succeeded, {} failed",
        report.success.len(),
        report.failed.len()
    );
    report
}

/// `resumes/<candidate_id>/<filename>`, with any client-supplied path components dropped.
pub fn resume_key(candidate_id: Uuid, filename: &str) -> String {
    let base = filename
        .rsplit(&['/', '\\'][..])
        .next()
        .map(str::trim)
        .filter(|b| !b.is_empty() && *b != "." && *b != "..")
        .unwrap_or("resume");
    format!("resumes/{candidate_id}/{base}")
}
