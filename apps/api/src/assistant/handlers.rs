use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::assistant::chat::{
    candidate_context, parse_chat_reply, ChatAnswer, MAX_CONTEXT_CANDIDATES,
};
use crate::assistant::prompts::{chat_prompt, chat_system, job_description_prompt, JD_SYSTEM};
use crate::candidates::store::list_candidates;
use crate::errors::AppError;
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub history: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateJdRequest {
    #[serde(default)]
    pub title: String,
    /// Free text or a list of skill names.
    #[serde(default)]
    pub skills: Value,
}

impl GenerateJdRequest {
    fn skills_text(&self) -> String {
        match &self.skills {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }
}

/// POST /api/v1/ai/chat
/// Answers a recruiter question over the stored candidate pool.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatAnswer>>, AppError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("Please provide a query".into()));
    }
    info!("Chat query received: {query}");

    let candidates = list_candidates(&state.db, Some(MAX_CONTEXT_CANDIDATES)).await?;
    if candidates.is_empty() {
        return Ok(ApiResponse::ok(ChatAnswer::no_candidates()));
    }

    let context: Vec<_> = candidates.iter().map(candidate_context).collect();
    let prompt = chat_prompt(&context, req.history.as_ref(), query)
        .map_err(|e| AppError::Internal(e.into()))?;

    let raw = state.llm.call_text(&prompt, &chat_system()).await?;
    Ok(ApiResponse::ok(parse_chat_reply(&raw)))
}

/// POST /api/v1/ai/generate-jd
pub async fn handle_generate_jd(
    State(state): State<AppState>,
    Json(req): Json<GenerateJdRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".into()));
    }

    let prompt = job_description_prompt(req.title.trim(), &req.skills_text());
    let html = state.llm.call_text(&prompt, JD_SYSTEM).await?;
    info!("Generated job description for '{}'", req.title.trim());
    Ok(ApiResponse::ok(html))
}
