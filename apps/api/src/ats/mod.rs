//! ATS analyzer: heuristic résumé-quality score, independent of any posting.
//!
//! Four categories are summed and capped at 100:
//! contact (20), structure (20), skill density (30), experience quality (30).

use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateProfile;

pub const MIN_SUMMARY_CHARS: usize = 50;
pub const MIN_DESCRIPTION_CHARS: usize = 30;
/// Skill count below which density feedback is emitted. Independent of the scoring bands.
pub const SKILL_FEEDBACK_THRESHOLD: usize = 8;

pub const CONTACT_FEEDBACK: &str = "Missing or incomplete contact identification (Phone / LinkedIn).";
pub const SUMMARY_MISSING_FEEDBACK: &str =
    "Executive summary is missing; add a 2-3 sentence professional bio.";
pub const SUMMARY_SHORT_FEEDBACK: &str =
    "Executive summary is too brief; expand on your core value proposition.";
pub const SKILL_DENSITY_FEEDBACK: &str =
    "Technical skill density is low; aim for at least 8-10 core competencies.";
pub const DESCRIPTION_FEEDBACK: &str =
    "Job descriptions are missing or too short; use action verbs and quantify achievements.";
pub const NO_EXPERIENCE_FEEDBACK: &str =
    "Numerical experience data is missing; ensure chronological work history is listed.";
pub const OPTIMIZED_FEEDBACK: &str = "Resume is highly optimized for modern ATS systems.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsReport {
    /// 0 – 100.
    pub score: u32,
    /// Never empty: one affirming message when nothing is flagged.
    pub feedback: Vec<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn analyze(profile: &CandidateProfile) -> AtsReport {
    let mut feedback: Vec<String> = Vec::new();

    // Contact
    let mut contact = 0;
    if present(profile.email.as_deref()).is_some_and(|e| !e.contains("unknown")) {
        contact += 7;
    }
    if present(profile.phone.as_deref()).is_some() {
        contact += 7;
    }
    let linkedin = profile
        .social_profiles
        .as_ref()
        .and_then(|s| present(s.linkedin.as_deref()));
    if linkedin.is_some() {
        contact += 6;
    }
    if contact < 20 {
        feedback.push(CONTACT_FEEDBACK.to_string());
    }

    // Structure
    let mut structure = 0;
    match present(profile.summary.as_deref()) {
        Some(summary) if summary.chars().count() >= MIN_SUMMARY_CHARS => structure += 10,
        Some(_) => feedback.push(SUMMARY_SHORT_FEEDBACK.to_string()),
        None => feedback.push(SUMMARY_MISSING_FEEDBACK.to_string()),
    }
    if !profile.experience.is_empty() {
        structure += 5;
    }
    if !profile.education.is_empty() {
        structure += 5;
    }

    // Skill density
    let skill_count = profile.skills.len();
    let density = match skill_count {
        n if n >= 10 => 30,
        n if n >= 5 => 20,
        n if n > 0 => 10,
        _ => 0,
    };
    if skill_count < SKILL_FEEDBACK_THRESHOLD {
        feedback.push(SKILL_DENSITY_FEEDBACK.to_string());
    }

    // Experience quality
    let mut quality = 0;
    let all_described = profile.experience.iter().all(|e| {
        e.description
            .as_deref()
            .is_some_and(|d| d.chars().count() >= MIN_DESCRIPTION_CHARS)
    });
    if all_described && !profile.experience.is_empty() {
        quality += 15;
    }
    if profile.years_of_experience() > 0.0 {
        quality += 15;
    }
    if !all_described {
        feedback.push(DESCRIPTION_FEEDBACK.to_string());
    }
    if profile.experience.is_empty() {
        feedback.push(NO_EXPERIENCE_FEEDBACK.to_string());
    }

    let score = (contact + structure + density + quality).min(100);

    if feedback.is_empty() {
        feedback.push(OPTIMIZED_FEEDBACK.to_string());
    }

    AtsReport { score, feedback }
}
