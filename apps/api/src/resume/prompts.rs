use crate::llm_client::prompts::json_system;

pub fn resume_parse_system() -> String {
    json_system(
        "You are a resume parsing assistant. \
         Extract structured information exactly as requested.",
    )
}

pub fn resume_parse_prompt(resume_text: &str) -> String {
    format!(
        r#"Extract structured information from the following resume text.

Return a JSON object with these fields:
- firstName (string, required)
- lastName (string, required)
- email (string, required)
- phone (string)
- location: {{ city, state, country, zipCode }}
- headline (string)
- summary (string)
- totalYearsOfExperience (number)
- experience: array of {{ company, title, startDate, endDate, current, description }}
- education: array of {{ institution, degree, field, gpa }}
- skills: array of {{ name, level: "beginner" | "intermediate" | "advanced" | "expert" }}
- socialProfiles: {{ linkedin, github, portfolio }}

Omit fields the resume does not state. Do not guess contact details.

Resume text:
{resume_text}"#
    )
}
