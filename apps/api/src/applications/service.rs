use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::matching::candidate_match::build_explanation;
use crate::matching::{CandidateMatch, MatchStrategy};
use crate::models::application::{ApplicationRow, CurrentStage, MatchingScore, TimelineEvent};
use crate::models::candidate::CandidateRow;
use crate::models::job::{JobPosting, JobRow};

pub const DEFAULT_STAGE: &str = "Screening";
pub const APPLIED_STAGE: &str = "Applied";
pub const APPLIED_ACTION: &str = "applied";

/// The first configured pipeline stage, or `Screening`/0 when the job has none.
pub fn initial_stage(job: &JobPosting, now: DateTime<Utc>) -> CurrentStage {
    match job.pipeline.first() {
        Some(stage) => CurrentStage {
            name: stage.name.clone(),
            order: stage.order,
            entered_at: now,
        },
        None => CurrentStage {
            name: DEFAULT_STAGE.to_string(),
            order: 0,
            entered_at: now,
        },
    }
}

pub fn initial_timeline(now: DateTime<Utc>) -> Vec<TimelineEvent> {
    vec![TimelineEvent {
        stage: APPLIED_STAGE.to_string(),
        action: APPLIED_ACTION.to_string(),
        moved_at: now,
        reason: None,
    }]
}

/// Recruiter-side score for a candidate applying to a job.
pub fn score_application(
    candidate: &CandidateRow,
    job: &JobRow,
    now: DateTime<Utc>,
) -> MatchingScore {
    let result = CandidateMatch.score(&candidate.profile.0, &job.posting.0);
    MatchingScore {
        explanation: build_explanation(&result),
        overall: result.overall,
        breakdown: result.breakdown,
        calculated_at: now,
    }
}

/// An application with its candidate and, optionally, its job inlined.
#[derive(Debug, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub candidate: Option<CandidateRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobRow>,
}

/// Attaches related rows to each application, preserving application order.
/// Missing related rows (deleted since) are left as `None`.
pub fn embed(
    applications: Vec<ApplicationRow>,
    candidates: Vec<CandidateRow>,
    jobs: Vec<JobRow>,
) -> Vec<ApplicationView> {
    let candidates: HashMap<Uuid, CandidateRow> =
        candidates.into_iter().map(|c| (c.id, c)).collect();
    let jobs: HashMap<Uuid, JobRow> = jobs.into_iter().map(|j| (j.id, j)).collect();

    applications
        .into_iter()
        .map(|application| ApplicationView {
            candidate: candidates.get(&application.candidate_id).cloned(),
            job: jobs.get(&application.job_id).cloned(),
            application,
        })
        .collect()
}
