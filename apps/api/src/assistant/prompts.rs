use serde_json::Value;

use crate::assistant::chat::CandidateContext;
use crate::llm_client::prompts::json_system;

pub fn chat_system() -> String {
    json_system(
        "You are HireAI, a precise recruitment intelligence system. \
         You help recruiters find and analyze talent.",
    )
}

pub fn chat_prompt(
    candidates: &[CandidateContext],
    history: Option<&Value>,
    query: &str,
) -> Result<String, serde_json::Error> {
    let context = serde_json::to_string_pretty(candidates)?;
    let history = match history {
        Some(h) if !h.is_null() => format!("CHAT HISTORY:\n{}\n", serde_json::to_string_pretty(h)?),
        _ => String::new(),
    };

    Ok(format!(
        r#"CANDIDATE DATABASE ({count} total candidates):
{context}

{history}
USER QUESTION: "{query}"

Guidelines:
1. If the user refers to "this candidate" and only one candidate exists or one was discussed previously, refer to that candidate.
2. Report names, skills and education exactly as they appear in the database.
3. If no candidate matches, say so clearly.
4. Answer naturally; do not preface answers with "based on the context".

Return a JSON object with this structure:
{{
    "answer": "Your detailed answer",
    "matches": ["candidate_id_1"],
    "explanation": "Brief reasoning"
}}"#,
        count = candidates.len(),
    ))
}

pub const JD_SYSTEM: &str =
    "You are a professional HR assistant who writes compelling job descriptions.";

pub fn job_description_prompt(title: &str, skills: &str) -> String {
    format!(
        "Generate a professional, ATS-optimized job description for:\n\
         Position: {title}\n\
         Required Skills: {skills}\n\n\
         Format the response as clean HTML with proper headings for: \
         Job Title, About the Role, Responsibilities, Requirements, and Benefits."
    )
}
