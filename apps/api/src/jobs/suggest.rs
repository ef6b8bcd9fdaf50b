//! Ranking of open postings for the job-seeker view.

use serde::Serialize;

use crate::matching::{Breakdown, JobMatch, MatchStrategy};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRow;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 20;

/// Score given to every posting when no parsed résumé exists to match against.
pub const NO_CANDIDATE_SCORE: u32 = 70;

/// District value the UI sends for "no filter".
pub const ALL_DISTRICTS: &str = "All Districts";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedJob {
    #[serde(flatten)]
    pub job: JobRow,
    pub match_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_breakdown: Option<Breakdown>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// `None` when the district means "everywhere".
pub fn normalize_district(district: Option<&str>) -> Option<&str> {
    district
        .map(str::trim)
        .filter(|d| !d.is_empty() && *d != ALL_DISTRICTS)
}

/// Scores each posting against the candidate (or a flat score without one),
/// sorts descending by score keeping input order for ties, and keeps the top `limit`.
pub fn rank_jobs(
    jobs: Vec<JobRow>,
    candidate: Option<&CandidateProfile>,
    limit: usize,
) -> Vec<SuggestedJob> {
    let mut ranked: Vec<SuggestedJob> = jobs
        .into_iter()
        .map(|job| match candidate {
            Some(profile) => {
                let result = JobMatch.score(profile, &job.posting.0);
                SuggestedJob {
                    match_score: result.overall,
                    match_breakdown: Some(result.breakdown),
                    matched_skills: result.matched_skills,
                    missing_skills: result.missing_skills,
                    job,
                }
            }
            None => SuggestedJob {
                job,
                match_score: NO_CANDIDATE_SCORE,
                match_breakdown: None,
                matched_skills: Vec::new(),
                missing_skills: Vec::new(),
            },
        })
        .collect();

    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked.truncate(limit);
    ranked
}
