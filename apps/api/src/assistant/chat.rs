use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::extract_json_object;
use crate::models::candidate::CandidateRow;

/// Candidates included in the model context per question.
pub const MAX_CONTEXT_CANDIDATES: i64 = 100;
const MAX_DESCRIPTION_CHARS: usize = 200;

pub const NO_CANDIDATES_ANSWER: &str = "No candidates have been ingested yet. \
    Please upload resumes first to use the AI intelligence features.";
pub const NO_CANDIDATES_EXPLANATION: &str = "The candidate database is empty.";
pub const UNCLEAR_ANSWER: &str = "I processed the request but couldn't generate a clear answer.";
pub const RETRY_HINT: &str =
    "I'm having trouble formatting the response. Please try asking again.";
pub const FALLBACK_EXPLANATION: &str = "Fallback from malformed JSON";

/// Compact per-candidate record sent to the model.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateContext {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub skills: String,
    pub summary: String,
    pub experience: Vec<ExperienceContext>,
    pub education: String,
    pub years_of_experience: f64,
    pub ats_score: i32,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ExperienceContext {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub matches: Vec<String>,
    pub explanation: String,
}

impl ChatAnswer {
    pub fn no_candidates() -> Self {
        Self {
            answer: NO_CANDIDATES_ANSWER.to_string(),
            matches: Vec::new(),
            explanation: NO_CANDIDATES_EXPLANATION.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ModelReply {
    answer: Option<String>,
    #[serde(default)]
    matches: Vec<String>,
    explanation: Option<String>,
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

pub fn candidate_context(row: &CandidateRow) -> CandidateContext {
    let profile = &row.profile.0;

    let location = profile
        .location
        .as_ref()
        .map(|l| {
            [&l.city, &l.state, &l.country]
                .into_iter()
                .filter_map(|part| part.as_deref().map(str::trim))
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| "Not specified".to_string());

    let skills = if profile.skills.is_empty() {
        "No skills listed".to_string()
    } else {
        profile
            .skills
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let experience = profile
        .experience
        .iter()
        .map(|e| {
            let end = if e.current {
                "Present"
            } else {
                e.end_date.as_deref().unwrap_or("?")
            };
            ExperienceContext {
                title: e.title.clone().unwrap_or_default(),
                company: e.company.clone().unwrap_or_default(),
                duration: format!("{} - {end}", e.start_date.as_deref().unwrap_or("?")),
                description: e
                    .description
                    .as_deref()
                    .unwrap_or("")
                    .chars()
                    .take(MAX_DESCRIPTION_CHARS)
                    .collect(),
            }
        })
        .collect();

    let education = profile
        .education
        .iter()
        .map(|e| {
            format!(
                "{} in {} from {}",
                e.degree.as_deref().unwrap_or(""),
                e.field.as_deref().unwrap_or(""),
                e.institution.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    CandidateContext {
        id: row.id.to_string(),
        full_name: profile.display_name(),
        email: or_placeholder(Some(&row.email), "Not provided"),
        phone: or_placeholder(profile.phone.as_deref(), "Not provided"),
        location,
        skills,
        summary: or_placeholder(profile.summary.as_deref(), "No summary available"),
        experience,
        education: or_placeholder(Some(&education), "Not listed"),
        years_of_experience: profile.years_of_experience(),
        ats_score: row.ats_score,
        status: or_placeholder(Some(&row.status), "new"),
    }
}

/// Interprets the model's reply. Malformed JSON degrades to the raw text as the answer,
/// or a retry hint when there is too little text to be useful.
pub fn parse_chat_reply(raw: &str) -> ChatAnswer {
    let text = extract_json_object(raw);
    match serde_json::from_str::<ModelReply>(text) {
        Ok(reply) => ChatAnswer {
            answer: reply
                .answer
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| UNCLEAR_ANSWER.to_string()),
            matches: reply.matches,
            explanation: reply.explanation.unwrap_or_default(),
        },
        Err(e) => {
            warn!("Chat reply was not valid JSON ({e}); using raw text");
            let answer = if text.chars().count() > 5 {
                text.to_string()
            } else {
                RETRY_HINT.to_string()
            };
            ChatAnswer {
                answer,
                matches: Vec::new(),
                explanation: FALLBACK_EXPLANATION.to_string(),
            }
        }
    }
}
