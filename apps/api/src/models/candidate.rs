use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// A skill label, optionally with a proficiency level.
///
/// Parsed résumés and scraped postings are inconsistent about shape, so a
/// skill deserializes from either a bare string (`"Rust"`) or an object
/// (`{"name": "Rust", "level": "expert"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SkillRepr")]
pub struct Skill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillRepr {
    Bare(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, deserialize_with = "lenient_level")]
        level: Option<SkillLevel>,
    },
}

impl From<SkillRepr> for Skill {
    fn from(repr: SkillRepr) -> Self {
        match repr {
            SkillRepr::Bare(name) => Skill::named(name),
            SkillRepr::Detailed { name, level } => Skill {
                name: name.unwrap_or_default(),
                level,
            },
        }
    }
}

/// Unknown level labels from the model are dropped instead of failing the whole profile.
pub(crate) fn lenient_level<'de, D>(deserializer: D) -> Result<Option<SkillLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| serde_json::from_value(Value::String(s.to_lowercase())).ok()))
}

/// Accepts a number or a string with a leading number ("5+", "3.8/4"); anything else is `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            let end = s
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(s.len());
            s[..end].parse().ok()
        }
        _ => None,
    })
}

/// `null` and unrecognised values read as `false`.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
        _ => false,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub company: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialProfiles {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

/// Structured candidate data as produced by résumé parsing.
/// Every field is optional on the wire; missing values mean "neutral" to the scorers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<Location>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_years_of_experience: Option<f64>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<Skill>,
    pub social_profiles: Option<SocialProfiles>,
}

impl CandidateProfile {
    pub fn years_of_experience(&self) -> f64 {
        self.total_years_of_experience
            .filter(|y| y.is_finite())
            .unwrap_or(0.0)
            .max(0.0)
    }

    pub fn city(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.city.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let name = name.trim();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile: Json<CandidateProfile>,
    pub resume_filename: Option<String>,
    pub resume_s3_key: Option<String>,
    pub resume_uploaded_at: Option<DateTime<Utc>>,
    pub parsed_resume: Option<Json<Value>>,
    pub status: String,
    pub tags: Vec<String>,
    pub ats_score: i32,
    pub ats_feedback: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_from_bare_string() {
        let skill: Skill = serde_json::from_str(r#""Python""#).unwrap();
        assert_eq!(skill, Skill::named("Python"));
    }

    #[test]
    fn test_skill_from_object_with_level() {
        let skill: Skill = serde_json::from_str(r#"{"name": "Rust", "level": "Expert"}"#).unwrap();
        assert_eq!(skill.name, "Rust");
        assert_eq!(skill.level, Some(SkillLevel::Expert));
    }

    #[test]
    fn test_skill_unknown_level_is_dropped() {
        let skill: Skill = serde_json::from_str(r#"{"name": "Go", "level": "guru"}"#).unwrap();
        assert_eq!(skill.level, None);
    }

    #[test]
    fn test_loosely_typed_model_output_is_tolerated() {
        let json = r#"{
            "totalYearsOfExperience": "5+",
            "experience": [{"company": "Acme", "current": null}, {"current": "true"}],
            "education": [{"degree": "B.E.", "gpa": "8.2/10"}, {"gpa": "n/a"}]
        }"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.years_of_experience(), 5.0);
        assert!(!profile.experience[0].current);
        assert!(profile.experience[1].current);
        assert_eq!(profile.education[0].gpa, Some(8.2));
        assert_eq!(profile.education[1].gpa, None);
    }

    #[test]
    fn test_profile_deserializes_camel_case_with_missing_fields() {
        let json = r#"{
            "firstName": "Asha",
            "totalYearsOfExperience": 4.5,
            "location": {"city": "Chennai"},
            "skills": ["Python", {"name": "AWS", "level": "advanced"}]
        }"#;
        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Asha"));
        assert_eq!(profile.years_of_experience(), 4.5);
        assert_eq!(profile.city(), Some("Chennai"));
        assert_eq!(profile.skills.len(), 2);
        assert!(profile.experience.is_empty());
        assert!(profile.social_profiles.is_none());
    }

    #[test]
    fn test_negative_years_clamp_to_zero() {
        let profile = CandidateProfile {
            total_years_of_experience: Some(-3.0),
            ..Default::default()
        };
        assert_eq!(profile.years_of_experience(), 0.0);
    }

    #[test]
    fn test_display_name_falls_back() {
        assert_eq!(CandidateProfile::default().display_name(), "Unknown");
    }
}
