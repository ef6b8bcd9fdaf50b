use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::{JobPosting, JobRow, JobStatus};

/// Upper bound on postings considered for suggestions.
pub const SUGGESTION_POOL_SIZE: i64 = 50;

/// Escapes LIKE wildcards so user input matches literally as a substring.
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Inserts a posting whose `job_code` and `status` have already been resolved.
pub async fn insert_job(pool: &PgPool, id: Uuid, posting: &JobPosting) -> sqlx::Result<JobRow> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, job_code, title, company, district, status, posting)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(posting.job_code.as_deref().unwrap_or_default())
    .bind(&posting.title)
    .bind(posting.company.as_deref())
    .bind(posting.district())
    .bind(posting.status.unwrap_or_default().as_str())
    .bind(Json(posting))
    .fetch_one(pool)
    .await
}

/// Open postings, optionally filtered by a case-insensitive district substring.
pub async fn list_open_jobs(pool: &PgPool, district: Option<&str>) -> sqlx::Result<Vec<JobRow>> {
    sqlx::query_as::<_, JobRow>(
        r#"
        SELECT * FROM jobs
        WHERE status = $1
          AND ($2::text IS NULL OR district ILIKE $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(JobStatus::Open.as_str())
    .bind(district.map(contains_pattern))
    .bind(SUGGESTION_POOL_SIZE)
    .fetch_all(pool)
    .await
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<JobRow>> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Deletes every posting (applications cascade). Returns the number removed.
pub async fn clear_jobs(pool: &PgPool) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM jobs").execute(pool).await?;
    Ok(result.rows_affected())
}
