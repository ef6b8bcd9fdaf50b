use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::candidate::CandidateProfile;
use crate::resume::prompts::{resume_parse_prompt, resume_parse_system};

pub const DEFAULT_FIRST_NAME: &str = "Unknown";
pub const DEFAULT_LAST_NAME: &str = "Candidate";

/// A parsed résumé: the typed profile plus the model's raw JSON, kept for audit.
#[derive(Debug, Clone)]
pub struct ParsedResume {
    pub profile: CandidateProfile,
    pub raw: Value,
}

/// Turns extracted résumé text into a structured profile.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<ParsedResume, AppError>;
}

/// Default parser: one structured-output call to the language model.
pub struct LlmResumeParser {
    llm: LlmClient,
}

impl LlmResumeParser {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeParser for LlmResumeParser {
    async fn parse(&self, text: &str) -> Result<ParsedResume, AppError> {
        info!("Parsing resume ({} chars) via {}", text.len(), self.llm.model());
        let raw: Value = self
            .llm
            .call_json(&resume_parse_prompt(text), &resume_parse_system())
            .await?;

        let mut profile: CandidateProfile = serde_json::from_value(raw.clone()).map_err(|e| {
            warn!("Parsed resume did not match the profile shape: {e}");
            AppError::Extraction("AI returned structurally invalid data; please try again".into())
        })?;
        apply_identity_defaults(&mut profile);

        Ok(ParsedResume { profile, raw })
    }
}

/// Fills in name placeholders and a unique placeholder email so every candidate is storable.
pub fn apply_identity_defaults(profile: &mut CandidateProfile) {
    fill_blank(&mut profile.first_name, DEFAULT_FIRST_NAME);
    fill_blank(&mut profile.last_name, DEFAULT_LAST_NAME);
    if is_blank(profile.email.as_deref()) {
        profile.email = Some(placeholder_email());
    }
}

/// `unknown-<millis>-<5 chars>@example.com`; the ATS scorer treats any "unknown" email as absent.
pub fn placeholder_email() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(5).collect();
    format!(
        "unknown-{}-{suffix}@example.com",
        Utc::now().timestamp_millis()
    )
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn fill_blank(field: &mut Option<String>, default: &str) {
    if is_blank(field.as_deref()) {
        *field = Some(default.to_string());
    }
}
