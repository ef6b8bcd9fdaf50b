use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::candidate::{lenient_level, Skill, SkillLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    PendingApproval,
    #[default]
    Open,
    OnHold,
    Closed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::PendingApproval => "pending_approval",
            JobStatus::Open => "open",
            JobStatus::OnHold => "on_hold",
            JobStatus::Closed => "closed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteType {
    Remote,
    Onsite,
    Hybrid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobLocation {
    #[serde(rename = "type")]
    pub kind: Option<RemoteType>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

/// A skill a posting asks for, with a required flag and a relative weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RequiredSkillRepr")]
pub struct RequiredSkill {
    pub name: String,
    pub level: Option<SkillLevel>,
    pub required: bool,
    pub weight: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequiredSkillRepr {
    Bare(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, deserialize_with = "lenient_level")]
        level: Option<SkillLevel>,
        #[serde(default = "default_true")]
        required: bool,
        #[serde(default = "default_weight")]
        weight: f64,
    },
}

impl From<RequiredSkillRepr> for RequiredSkill {
    fn from(repr: RequiredSkillRepr) -> Self {
        match repr {
            RequiredSkillRepr::Bare(name) => RequiredSkill::named(name),
            RequiredSkillRepr::Detailed {
                name,
                level,
                required,
                weight,
            } => RequiredSkill {
                name: name.unwrap_or_default(),
                level,
                required,
                weight,
            },
        }
    }
}

impl RequiredSkill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            required: true,
            weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationRequirement {
    pub level: Option<String>,
    pub field: Option<String>,
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceRequirement {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRequirements {
    pub skills: Vec<RequiredSkill>,
    pub education: Option<EducationRequirement>,
    pub experience: Option<ExperienceRequirement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Compensation {
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub currency: Option<String>,
    pub pay_frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    pub name: String,
    pub order: i32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A job posting as submitted by a recruiter or an ingestion job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    pub title: String,
    pub job_code: Option<String>,
    pub description: String,
    pub company: Option<String>,
    pub district: Option<String>,
    pub original_url: Option<String>,
    pub department: Option<String>,
    pub team: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub location: Option<JobLocation>,
    pub requirements: JobRequirements,
    /// Flat skill list used by postings that do not carry structured requirements.
    pub skills: Vec<Skill>,
    pub compensation: Option<Compensation>,
    pub pipeline: Vec<PipelineStage>,
    pub status: Option<JobStatus>,
}

impl JobPosting {
    /// Structured required skills when present, otherwise the flat `skills` list.
    pub fn required_skills(&self) -> Vec<Skill> {
        if !self.requirements.skills.is_empty() {
            self.requirements
                .skills
                .iter()
                .map(|s| Skill {
                    name: s.name.clone(),
                    level: s.level,
                })
                .collect()
        } else {
            self.skills.clone()
        }
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref().filter(|d| !d.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub job_code: String,
    pub title: String,
    pub company: Option<String>,
    pub district: Option<String>,
    pub status: String,
    pub posting: Json<JobPosting>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_skill_defaults() {
        let skill: RequiredSkill = serde_json::from_str(r#"{"name": "Docker"}"#).unwrap();
        assert!(skill.required);
        assert_eq!(skill.weight, 1.0);
    }

    #[test]
    fn test_required_skill_from_bare_string() {
        let skill: RequiredSkill = serde_json::from_str(r#""Kafka""#).unwrap();
        assert_eq!(skill.name, "Kafka");
        assert!(skill.required);
    }

    #[test]
    fn test_posting_deserializes_location_type() {
        let json = r#"{
            "title": "Backend Engineer",
            "description": "Build services",
            "employmentType": "full-time",
            "location": {"type": "remote"},
            "requirements": {
                "skills": [{"name": "Rust", "required": false, "weight": 2}],
                "experience": {"min": 3}
            }
        }"#;
        let posting: JobPosting = serde_json::from_str(json).unwrap();
        assert_eq!(posting.employment_type, Some(EmploymentType::FullTime));
        assert_eq!(
            posting.location.and_then(|l| l.kind),
            Some(RemoteType::Remote)
        );
        assert!(!posting.requirements.skills[0].required);
        assert_eq!(posting.requirements.skills[0].weight, 2.0);
        assert_eq!(
            posting.requirements.experience.and_then(|e| e.min),
            Some(3.0)
        );
    }

    #[test]
    fn test_required_skills_falls_back_to_flat_list() {
        let posting = JobPosting {
            skills: vec![Skill::named("Go")],
            ..Default::default()
        };
        assert_eq!(posting.required_skills(), vec![Skill::named("Go")]);
    }

    #[test]
    fn test_required_skills_prefers_structured() {
        let posting = JobPosting {
            skills: vec![Skill::named("Go")],
            requirements: JobRequirements {
                skills: vec![RequiredSkill::named("Rust")],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(posting.required_skills(), vec![Skill::named("Rust")]);
    }

    #[test]
    fn test_job_status_serde() {
        let status: JobStatus = serde_json::from_str(r#""pending_approval""#).unwrap();
        assert_eq!(status, JobStatus::PendingApproval);
        assert_eq!(status.as_str(), "pending_approval");
    }
}
