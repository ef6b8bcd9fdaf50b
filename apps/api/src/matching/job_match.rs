//! Seeker-side scoring: how well an open posting fits a candidate's parsed résumé.
//!
//! overall = 0.50·skills + 0.25·experience + 0.15·location + 0.10·recency

use crate::matching::skills::match_skills;
use crate::matching::weights::JOB_MATCH_WEIGHTS;
use crate::matching::{to_percent, Breakdown, Dimension, MatchResult, MatchStrategy};
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;

/// Location score when the candidate's city and the posting's district do not overlap.
pub const LOCATION_NO_SIGNAL: f64 = 0.6;

/// Posting freshness. Constant: posting dates are not consulted.
pub const RECENCY_SCORE: f64 = 0.9;

pub struct JobMatch;

impl MatchStrategy for JobMatch {
    fn name(&self) -> &'static str {
        "job_match"
    }

    fn score(&self, candidate: &CandidateProfile, job: &JobPosting) -> MatchResult {
        let skills = match_skills(&candidate.skills, &job.required_skills());
        let experience = experience_score(candidate.years_of_experience());
        let location = location_score(candidate.city(), job.district());
        let recency = RECENCY_SCORE;

        let w = JOB_MATCH_WEIGHTS;
        let total = skills.coverage * w.skills
            + experience * w.experience
            + location * w.location
            + recency * w.recency;

        let breakdown = Breakdown::from([
            (Dimension::Skills, to_percent(skills.coverage)),
            (Dimension::Experience, to_percent(experience)),
            (Dimension::Location, to_percent(location)),
            (Dimension::Recency, to_percent(recency)),
        ]);

        MatchResult {
            overall: to_percent(total),
            breakdown,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
        }
    }
}

/// Coarse experience banding; boundaries belong to the higher band.
pub fn experience_score(years: f64) -> f64 {
    if years >= 5.0 {
        1.0
    } else if years >= 3.0 {
        0.85
    } else if years >= 1.0 {
        0.7
    } else {
        0.5
    }
}

/// 1.0 when the candidate city and the posting district contain one another (case-insensitive).
pub fn location_score(candidate_city: Option<&str>, job_district: Option<&str>) -> f64 {
    match (candidate_city, job_district) {
        (Some(city), Some(district)) => {
            let city = city.trim().to_lowercase();
            let district = district.trim().to_lowercase();
            if city.contains(&district) || district.contains(&city) {
                1.0
            } else {
                LOCATION_NO_SIGNAL
            }
        }
        _ => LOCATION_NO_SIGNAL,
    }
}
