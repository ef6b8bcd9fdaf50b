//! Recruiter assistant: question answering over the candidate pool and job-description drafting.

pub mod chat;
pub mod handlers;
pub mod prompts;
