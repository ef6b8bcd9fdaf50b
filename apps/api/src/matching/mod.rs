//! Match scoring: pure, synchronous scorers that compare a candidate profile with a job posting.
//!
//! Two strategies share the [`MatchStrategy`] trait but keep their own weights and edge-case
//! policies:
//! - [`JobMatch`]: seeker side, used to rank open postings for a résumé.
//! - [`CandidateMatch`]: recruiter side, persisted on applications.
//!
//! Scorers hold no state; identical inputs always produce identical output.

pub mod candidate_match;
pub mod job_match;
pub mod skills;
pub mod weights;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;

pub use candidate_match::CandidateMatch;
pub use job_match::JobMatch;

/// A scoring dimension reported in a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Skills,
    Experience,
    Education,
    Location,
    Recency,
}

/// Per-dimension percentages, each rounded independently.
pub type Breakdown = BTreeMap<Dimension, u32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Weighted overall percentage, 0 – 100.
    pub overall: u32,
    pub breakdown: Breakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// A named way of turning a candidate/posting pair into a [`MatchResult`].
pub trait MatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, candidate: &CandidateProfile, job: &JobPosting) -> MatchResult;
}

/// Converts a [0, 1] sub-score (or weighted sum) into a clamped integer percentage.
pub(crate) fn to_percent(value: f64) -> u32 {
    (value * 100.0).round().clamp(0.0, 100.0) as u32
}
