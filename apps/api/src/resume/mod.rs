//! Résumé intake: text extraction from uploaded files and LLM-backed structuring.

pub mod extract;
pub mod parser;
pub mod prompts;

pub use parser::{LlmResumeParser, ParsedResume, ResumeParser};
