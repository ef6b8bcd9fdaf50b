//! Recruiter-side scoring: how well an applicant fits a posting.
//!
//! overall = 0.40·skills + 0.30·experience + 0.20·education + 0.10·location
//!
//! Unlike [`super::JobMatch`], skills here use exact (case-insensitive) name membership and
//! an empty requirement list scores 1.0, not the default coverage.

use crate::matching::weights::CANDIDATE_MATCH_WEIGHTS;
use crate::matching::{to_percent, Breakdown, Dimension, MatchResult, MatchStrategy};
use crate::models::candidate::{CandidateProfile, EducationItem, Location, Skill};
use crate::models::job::{
    EducationRequirement, ExperienceRequirement, JobLocation, JobPosting, RemoteType,
    RequiredSkill,
};

/// Score for candidates above the posting's maximum experience.
pub const OVERQUALIFIED_SCORE: f64 = 0.8;
pub const SAME_STATE_SCORE: f64 = 0.5;
pub const DIFFERENT_REGION_SCORE: f64 = 0.2;

/// Degree label → ordinal rank. Unlisted labels rank 0.
pub const EDUCATION_RANKS: &[(&str, u32)] = &[("bachelor", 1), ("master", 2), ("phd", 3)];

pub struct CandidateMatch;

impl MatchStrategy for CandidateMatch {
    fn name(&self) -> &'static str {
        "candidate_match"
    }

    fn score(&self, candidate: &CandidateProfile, job: &JobPosting) -> MatchResult {
        let requirements = &job.requirements;
        let (skills, matched_skills, missing_skills) =
            skills_score(&candidate.skills, &requirements.skills);
        let experience =
            experience_score(candidate.years_of_experience(), requirements.experience.as_ref());
        let education = education_score(&candidate.education, requirements.education.as_ref());
        let location = location_score(candidate.location.as_ref(), job.location.as_ref());

        let w = CANDIDATE_MATCH_WEIGHTS;
        let total = skills * w.skills
            + experience * w.experience
            + education * w.education
            + location * w.location;

        let breakdown = Breakdown::from([
            (Dimension::Skills, to_percent(skills)),
            (Dimension::Experience, to_percent(experience)),
            (Dimension::Education, to_percent(education)),
            (Dimension::Location, to_percent(location)),
        ]);

        MatchResult {
            overall: to_percent(total),
            breakdown,
            matched_skills,
            missing_skills,
        }
    }
}

/// Fraction of required skill names present in the candidate's lower-cased skill names.
/// Returns the score with the matched and missing (lower-cased) requirement names.
pub fn skills_score(
    candidate_skills: &[Skill],
    job_skills: &[RequiredSkill],
) -> (f64, Vec<String>, Vec<String>) {
    if job_skills.is_empty() {
        return (1.0, vec![], vec![]);
    }

    let candidate_names: Vec<String> = candidate_skills
        .iter()
        .map(|s| s.name.to_lowercase())
        .collect();

    let (matched, missing): (Vec<String>, Vec<String>) = job_skills
        .iter()
        .map(|s| s.name.to_lowercase())
        .partition(|name| candidate_names.contains(name));

    let score = matched.len() as f64 / job_skills.len() as f64;
    (score, matched, missing)
}

pub fn experience_score(years: f64, requirement: Option<&ExperienceRequirement>) -> f64 {
    let Some(min) = requirement
        .and_then(|r| r.min)
        .filter(|m| *m > 0.0)
    else {
        return 1.0;
    };
    // A zero or absent max means unbounded.
    let max = requirement
        .and_then(|r| r.max)
        .filter(|m| *m > 0.0)
        .unwrap_or(f64::INFINITY);

    if years >= min && years <= max {
        1.0
    } else if years < min {
        years / min
    } else {
        OVERQUALIFIED_SCORE
    }
}

pub fn education_rank(degree: &str) -> u32 {
    let degree = degree.trim().to_lowercase();
    EDUCATION_RANKS
        .iter()
        .find(|(label, _)| *label == degree)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

pub fn education_score(
    education: &[EducationItem],
    requirement: Option<&EducationRequirement>,
) -> f64 {
    let Some(level) = requirement
        .and_then(|r| r.level.as_deref())
        .filter(|l| !l.trim().is_empty())
    else {
        return 1.0;
    };

    let required_rank = education_rank(level);
    let best = education
        .iter()
        .filter_map(|e| e.degree.as_deref())
        .map(education_rank)
        .max()
        .unwrap_or(0);

    if best >= required_rank {
        1.0
    } else {
        best as f64 / required_rank as f64
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Remote postings and same-city candidates score 1.0, same state 0.5, otherwise 0.2.
/// Cities and states compare exactly; two unspecified values count as equal.
pub fn location_score(candidate: Option<&Location>, job: Option<&JobLocation>) -> f64 {
    let Some(job) = job else {
        return 1.0;
    };
    if job.kind == Some(RemoteType::Remote) {
        return 1.0;
    }

    let candidate_city = candidate.and_then(|c| non_blank(c.city.as_ref()));
    let candidate_state = candidate.and_then(|c| non_blank(c.state.as_ref()));

    if candidate_city == non_blank(job.city.as_ref()) {
        1.0
    } else if candidate_state == non_blank(job.state.as_ref()) {
        SAME_STATE_SCORE
    } else {
        DIFFERENT_REGION_SCORE
    }
}

/// Human-readable summary stored alongside an application's score.
pub fn build_explanation(result: &MatchResult) -> String {
    let weakest = result
        .breakdown
        .iter()
        .min_by_key(|(_, pct)| **pct)
        .map(|(dimension, pct)| format!("{} ({pct}%)", dimension_label(*dimension)));

    let missing: Vec<&str> = result
        .missing_skills
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();

    let mut text = if result.overall >= 80 {
        format!("Strong fit ({}/100).", result.overall)
    } else if result.overall >= 60 {
        format!("Moderate fit ({}/100).", result.overall)
    } else {
        format!("Low fit ({}/100).", result.overall)
    };

    if let Some(weakest) = weakest.filter(|_| result.overall < 100) {
        text.push_str(&format!(" Weakest area: {weakest}."));
    }
    if !missing.is_empty() {
        text.push_str(&format!(" Missing skills: {}.", missing.join(", ")));
    }
    text
}

fn dimension_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Skills => "skills",
        Dimension::Experience => "experience",
        Dimension::Education => "education",
        Dimension::Location => "location",
        Dimension::Recency => "recency",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobRequirements;

    fn req(min: Option<f64>, max: Option<f64>) -> ExperienceRequirement {
        ExperienceRequirement {
            min,
            max,
            required: Some(true),
        }
    }

    fn degree(d: &str) -> EducationItem {
        EducationItem {
            degree: Some(d.to_string()),
            ..Default::default()
        }
    }

    fn edu_req(level: &str) -> EducationRequirement {
        EducationRequirement {
            level: Some(level.to_string()),
            ..Default::default()
        }
    }

    fn loc(city: Option<&str>, state: Option<&str>) -> Location {
        Location {
            city: city.map(String::from),
            state: state.map(String::from),
            ..Default::default()
        }
    }

    fn job_loc(kind: Option<RemoteType>, city: Option<&str>, state: Option<&str>) -> JobLocation {
        JobLocation {
            kind,
            city: city.map(String::from),
            state: state.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_experience_within_range() {
        let r = req(Some(2.0), Some(6.0));
        assert_eq!(experience_score(2.0, Some(&r)), 1.0);
        assert_eq!(experience_score(6.0, Some(&r)), 1.0);
        assert_eq!(experience_score(4.0, Some(&r)), 1.0);
    }

    #[test]
    fn test_experience_above_max_is_penalized() {
        let r = req(Some(2.0), Some(6.0));
        assert_eq!(experience_score(6.5, Some(&r)), 0.8);
    }

    #[test]
    fn test_experience_below_min_is_linear() {
        let r = req(Some(4.0), None);
        assert_eq!(experience_score(2.0, Some(&r)), 0.5);
        assert_eq!(experience_score(0.0, Some(&r)), 0.0);
    }

    #[test]
    fn test_experience_without_min_is_satisfied() {
        assert_eq!(experience_score(0.0, None), 1.0);
        assert_eq!(experience_score(0.0, Some(&req(None, Some(3.0)))), 1.0);
        assert_eq!(experience_score(0.0, Some(&req(Some(0.0), None))), 1.0);
    }

    #[test]
    fn test_experience_zero_max_means_unbounded() {
        assert_eq!(experience_score(30.0, Some(&req(Some(2.0), Some(0.0)))), 1.0);
    }

    #[test]
    fn test_education_rank_table() {
        assert_eq!(education_rank("Bachelor"), 1);
        assert_eq!(education_rank(" master "), 2);
        assert_eq!(education_rank("PhD"), 3);
        assert_eq!(education_rank("Diploma"), 0);
    }

    #[test]
    fn test_education_meets_requirement() {
        let edu = vec![degree("bachelor"), degree("master")];
        assert_eq!(education_score(&edu, Some(&edu_req("Master"))), 1.0);
    }

    #[test]
    fn test_education_partial_credit() {
        let edu = vec![degree("bachelor")];
        assert!((education_score(&edu, Some(&edu_req("phd"))) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(education_score(&[], Some(&edu_req("master"))), 0.0);
    }

    #[test]
    fn test_education_unranked_requirement_is_satisfied() {
        assert_eq!(education_score(&[], Some(&edu_req("diploma"))), 1.0);
        assert_eq!(education_score(&[], None), 1.0);
        assert_eq!(education_score(&[], Some(&edu_req("  "))), 1.0);
    }

    #[test]
    fn test_location_remote_and_missing() {
        let far = loc(Some("Madurai"), Some("TN"));
        assert_eq!(location_score(Some(&far), None), 1.0);
        let remote = job_loc(Some(RemoteType::Remote), Some("Pune"), Some("MH"));
        assert_eq!(location_score(Some(&far), Some(&remote)), 1.0);
    }

    #[test]
    fn test_location_city_state_other() {
        let job = job_loc(Some(RemoteType::Onsite), Some("Chennai"), Some("TN"));
        assert_eq!(location_score(Some(&loc(Some("Chennai"), Some("TN"))), Some(&job)), 1.0);
        assert_eq!(location_score(Some(&loc(Some("Madurai"), Some("TN"))), Some(&job)), 0.5);
        assert_eq!(location_score(Some(&loc(Some("Pune"), Some("MH"))), Some(&job)), 0.2);
    }

    #[test]
    fn test_location_both_unspecified_city_counts_as_match() {
        let job = job_loc(Some(RemoteType::Hybrid), None, None);
        assert_eq!(location_score(None, Some(&job)), 1.0);
    }

    #[test]
    fn test_skills_exact_membership() {
        let candidate = vec![Skill::named("Python"), Skill::named("ReactJS")];
        let job = vec![RequiredSkill::named("python"), RequiredSkill::named("React")];
        let (score, matched, missing) = skills_score(&candidate, &job);
        assert_eq!(score, 0.5);
        assert_eq!(matched, vec!["python"]);
        assert_eq!(missing, vec!["react"]);
    }

    #[test]
    fn test_skills_without_requirements_is_full() {
        assert_eq!(skills_score(&[], &[]).0, 1.0);
    }

    #[test]
    fn test_full_score_with_rounded_breakdown() {
        let candidate = CandidateProfile {
            total_years_of_experience: Some(2.0),
            skills: vec![Skill::named("Rust"), Skill::named("Go")],
            education: vec![degree("bachelor")],
            location: Some(loc(Some("Pune"), Some("MH"))),
            ..Default::default()
        };
        let job = JobPosting {
            title: "Platform Engineer".to_string(),
            location: Some(job_loc(Some(RemoteType::Onsite), Some("Mumbai"), Some("MH"))),
            requirements: JobRequirements {
                skills: vec![
                    RequiredSkill::named("Rust"),
                    RequiredSkill::named("Go"),
                    RequiredSkill::named("Kafka"),
                ],
                experience: Some(req(Some(3.0), Some(8.0))),
                education: Some(edu_req("master")),
            },
            ..Default::default()
        };

        let result = CandidateMatch.score(&candidate, &job);
        assert_eq!(result.breakdown[&Dimension::Skills], 67);
        assert_eq!(result.breakdown[&Dimension::Experience], 67);
        assert_eq!(result.breakdown[&Dimension::Education], 50);
        assert_eq!(result.breakdown[&Dimension::Location], 50);
        // 0.4·(2/3) + 0.3·(2/3) + 0.2·0.5 + 0.1·0.5 = 0.61666…
        assert_eq!(result.overall, 62);
        assert_eq!(result.missing_skills, vec!["kafka"]);
        assert_eq!(result, CandidateMatch.score(&candidate, &job));
    }

    #[test]
    fn test_empty_posting_scores_perfect() {
        let result = CandidateMatch.score(&CandidateProfile::default(), &JobPosting::default());
        assert_eq!(result.overall, 100);
        assert!(result.breakdown.values().all(|v| *v == 100));
    }

    #[test]
    fn test_explanation_wording() {
        let mut result = CandidateMatch.score(&CandidateProfile::default(), &JobPosting::default());
        assert_eq!(build_explanation(&result), "Strong fit (100/100).");

        result.overall = 55;
        result.breakdown.insert(Dimension::Skills, 20);
        result.missing_skills = vec!["kafka".to_string(), "rust".to_string()];
        let text = build_explanation(&result);
        assert!(text.starts_with("Low fit (55/100)."));
        assert!(text.contains("Weakest area: skills (20%)"));
        assert!(text.contains("Missing skills: kafka, rust."));
    }
}
