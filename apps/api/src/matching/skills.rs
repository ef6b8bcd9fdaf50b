//! Skill normalization and required-skill coverage.
//!
//! A required skill is covered when, in order:
//! 1. any candidate skill and the requirement contain one another as substrings, or
//! 2. the requirement mentions a canonical skill or one of its aliases, and the
//!    candidate lists that canonical skill or an alias.

use serde::{Deserialize, Serialize};

use crate::models::candidate::Skill;

/// Coverage reported when a posting lists no required skills.
pub const DEFAULT_COVERAGE: f64 = 0.7;

/// Canonical skill name → known alternate spellings. Matching is substring-based
/// on both sides, so entries only need the distinct stems.
pub const SKILL_SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "ecmascript", "es6", "es2015"]),
    ("typescript", &["ts"]),
    ("react", &["reactjs", "react.js"]),
    ("node", &["nodejs", "node.js"]),
    ("python", &["py", "python3"]),
    ("java", &["java8", "java11", "java17"]),
    ("c++", &["cpp", "cplusplus"]),
    ("c#", &["csharp", "dotnet"]),
    ("mongodb", &["mongo"]),
    ("postgresql", &["postgres", "psql"]),
    ("kubernetes", &["k8s"]),
    ("amazon web services", &["aws"]),
    ("google cloud platform", &["gcp"]),
    ("machine learning", &["ml"]),
    ("artificial intelligence", &["ai"]),
    ("continuous integration", &["ci", "cicd", "ci/cd"]),
    ("rest api", &["restful", "rest", "api"]),
];

/// Result of matching a candidate's skills against a posting's required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Fraction of required skills covered, in [0, 1].
    pub coverage: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillMatch {
    /// Coverage as a percentage string with two decimals, e.g. `"66.67"`.
    pub fn match_percentage(&self) -> String {
        format!("{:.2}", self.coverage * 100.0)
    }
}

/// Lower-cases and trims a skill label. Blank labels normalize to `None`.
pub fn normalize_skill(label: &str) -> Option<String> {
    let normalized = label.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn normalize_all(skills: &[Skill]) -> Vec<String> {
    skills
        .iter()
        .filter_map(|s| normalize_skill(&s.name))
        .collect()
}

/// Matches normalized candidate skills against normalized required skills.
///
/// `matched.len() + missing.len()` always equals the number of non-blank
/// requirements. With no requirements the coverage is [`DEFAULT_COVERAGE`].
pub fn match_skills(candidate_skills: &[Skill], required_skills: &[Skill]) -> SkillMatch {
    let candidate = normalize_all(candidate_skills);
    let required = normalize_all(required_skills);

    if required.is_empty() {
        return SkillMatch {
            coverage: DEFAULT_COVERAGE,
            matched: vec![],
            missing: vec![],
        };
    }

    let (matched, missing): (Vec<String>, Vec<String>) = required
        .into_iter()
        .partition(|req| is_covered(&candidate, req));

    let coverage = matched.len() as f64 / (matched.len() + missing.len()) as f64;

    SkillMatch {
        coverage,
        matched,
        missing,
    }
}

fn is_covered(candidate: &[String], required: &str) -> bool {
    let direct = candidate
        .iter()
        .any(|c| c.contains(required) || required.contains(c.as_str()));
    if direct {
        return true;
    }

    SKILL_SYNONYMS.iter().any(|(canonical, aliases)| {
        mentions(required, canonical, aliases)
            && candidate.iter().any(|c| mentions(c, canonical, aliases))
    })
}

fn mentions(skill: &str, canonical: &str, aliases: &[&str]) -> bool {
    skill.contains(canonical) || aliases.iter().any(|alias| skill.contains(alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<Skill> {
        names.iter().map(|n| Skill::named(*n)).collect()
    }

    #[test]
    fn test_empty_requirements_default_coverage() {
        let result = match_skills(&skills(&["rust"]), &[]);
        assert_eq!(result.coverage, 0.7);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.match_percentage(), "70.00");
    }

    #[test]
    fn test_blank_requirements_count_as_empty() {
        let result = match_skills(&skills(&["rust"]), &skills(&["  ", ""]));
        assert_eq!(result.coverage, DEFAULT_COVERAGE);
    }

    #[test]
    fn test_mixed_coverage_scenario() {
        let candidate = skills(&["Python", "AWS"]);
        let required = skills(&["python", "Docker", "AWS", "React"]);

        let result = match_skills(&candidate, &required);
        assert_eq!(result.matched, vec!["python", "aws"]);
        assert_eq!(result.missing, vec!["docker", "react"]);
        assert_eq!(result.coverage, 0.5);
        assert_eq!(result.match_percentage(), "50.00");
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let result = match_skills(&skills(&["ReactJS"]), &skills(&["React"]));
        assert_eq!(result.matched, vec!["react"]);
        assert_eq!(result.coverage, 1.0);
    }

    #[test]
    fn test_synonym_abbreviation_to_full_name() {
        let result = match_skills(&skills(&["JavaScript"]), &skills(&["JS"]));
        assert_eq!(result.matched, vec!["js"]);
    }

    #[test]
    fn test_synonym_full_name_to_abbreviation() {
        let result = match_skills(&skills(&["k8s"]), &skills(&["Kubernetes"]));
        assert_eq!(result.matched, vec!["kubernetes"]);
    }

    #[test]
    fn test_unrelated_skill_is_missing() {
        let result = match_skills(&skills(&["Haskell"]), &skills(&["Docker"]));
        assert_eq!(result.missing, vec!["docker"]);
        assert_eq!(result.coverage, 0.0);
    }

    #[test]
    fn test_no_candidate_skills_everything_missing() {
        let required = skills(&["Go", "Terraform", "Docker"]);
        let result = match_skills(&[], &required);
        assert_eq!(result.matched.len(), 0);
        assert_eq!(result.missing.len(), 3);
    }

    #[test]
    fn test_matched_plus_missing_equals_required() {
        let candidate = skills(&["node.js", "mongo", "gcp", "scala"]);
        let required = skills(&[
            "Node", "MongoDB", "Google Cloud Platform", "Rust", "Kafka", "Elixir",
        ]);
        let result = match_skills(&candidate, &required);
        assert_eq!(result.matched.len() + result.missing.len(), required.len());
        assert!((result.coverage - result.matched.len() as f64 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_skill() {
        assert_eq!(normalize_skill("  TypeScript "), Some("typescript".to_string()));
        assert_eq!(normalize_skill("   "), None);
    }

    #[test]
    fn test_match_is_idempotent() {
        let candidate = skills(&["Python", "AWS"]);
        let required = skills(&["python", "Docker"]);
        assert_eq!(
            match_skills(&candidate, &required),
            match_skills(&candidate, &required)
        );
    }
}
