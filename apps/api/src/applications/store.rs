use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::{
    ApplicationRow, ApplicationStatus, CurrentStage, MatchingScore, Priority, TimelineEvent,
};
use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;

pub struct NewApplication<'a> {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub current_stage: &'a CurrentStage,
    pub timeline: &'a [TimelineEvent],
    pub matching_score: &'a MatchingScore,
}

/// Fails with a unique violation when the candidate already applied to the job.
pub async fn insert_application(
    pool: &PgPool,
    new: NewApplication<'_>,
) -> sqlx::Result<ApplicationRow> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (id, job_id, candidate_id, current_stage, timeline, matching_score,
             overall_score, status, priority)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(new.id)
    .bind(new.job_id)
    .bind(new.candidate_id)
    .bind(Json(new.current_stage))
    .bind(Json(new.timeline))
    .bind(Json(new.matching_score))
    .bind(new.matching_score.overall as i32)
    .bind(ApplicationStatus::default().as_str())
    .bind(Priority::default().as_str())
    .fetch_one(pool)
    .await
}

pub async fn list_applications(pool: &PgPool) -> sqlx::Result<Vec<ApplicationRow>> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Applications for one job, best match first.
pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> sqlx::Result<Vec<ApplicationRow>> {
    sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT * FROM applications
        WHERE job_id = $1
        ORDER BY overall_score DESC, created_at ASC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

pub async fn candidates_by_ids(pool: &PgPool, ids: &[Uuid]) -> sqlx::Result<Vec<CandidateRow>> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}

pub async fn jobs_by_ids(pool: &PgPool, ids: &[Uuid]) -> sqlx::Result<Vec<JobRow>> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}
