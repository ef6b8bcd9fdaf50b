use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::ats::AtsReport;
use crate::models::candidate::{CandidateProfile, CandidateRow};

/// Name and email columns are copied out of the profile for indexing.
fn identity(profile: &CandidateProfile) -> (&str, &str, &str) {
    (
        profile.first_name.as_deref().unwrap_or(""),
        profile.last_name.as_deref().unwrap_or(""),
        profile.email.as_deref().unwrap_or(""),
    )
}

pub struct NewCandidate<'a> {
    pub id: Uuid,
    pub profile: &'a CandidateProfile,
    pub resume_filename: &'a str,
    pub resume_s3_key: &'a str,
    pub parsed_resume: &'a Value,
    pub ats: &'a AtsReport,
}

pub async fn insert_candidate(pool: &PgPool, new: NewCandidate<'_>) -> sqlx::Result<CandidateRow> {
    let (first_name, last_name, email) = identity(new.profile);
    sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (id, first_name, last_name, email, profile, resume_filename, resume_s3_key,
             resume_uploaded_at, parsed_resume, ats_score, ats_feedback)
        VALUES ($1, $2, $3, $4, $5, $6, $7, now(), $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(new.id)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(Json(new.profile))
    .bind(new.resume_filename)
    .bind(new.resume_s3_key)
    .bind(Json(new.parsed_resume))
    .bind(new.ats.score as i32)
    .bind(&new.ats.feedback)
    .fetch_one(pool)
    .await
}

pub async fn list_candidates(pool: &PgPool, limit: Option<i64>) -> sqlx::Result<Vec<CandidateRow>> {
    sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<CandidateRow>> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// The most recently created candidate whose résumé has been parsed.
pub async fn latest_parsed_candidate(pool: &PgPool) -> sqlx::Result<Option<CandidateRow>> {
    sqlx::query_as::<_, CandidateRow>(
        r#"
        SELECT * FROM candidates
        WHERE parsed_resume IS NOT NULL
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

/// Replaces the profile and overwrites the stored ATS result.
pub async fn update_candidate(
    pool: &PgPool,
    id: Uuid,
    profile: &CandidateProfile,
    ats: &AtsReport,
) -> sqlx::Result<Option<CandidateRow>> {
    let (first_name, last_name, email) = identity(profile);
    sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates
        SET first_name = $2, last_name = $3, email = $4, profile = $5,
            ats_score = $6, ats_feedback = $7, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(Json(profile))
    .bind(ats.score as i32)
    .bind(&ats.feedback)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete_candidate(pool: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
