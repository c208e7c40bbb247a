// Prompt templates for turning an uploaded résumé into structured JSON.

pub const RESUME_PARSE_ROLE: &str = "You are an expert resume parser. \
    You convert resume text into structured data, copying facts exactly as written.";

/// Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Convert the resume text below into structured JSON.

RESUME TEXT:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "contact": {"name": "string", "email": "string|null", "phone": "string|null", "location": "string|null", "linkedin": "string|null", "github": "string|null", "website": "string|null"},
  "summary": "string",
  "skills": {"technical": ["string"], "soft": ["string"]},
  "education": [{"institution": "string", "degree": "string", "field": "string|null", "startDate": "string|null", "endDate": "string|null", "grade": "string|null"}],
  "workExperience": [{"company": "string", "title": "string", "location": "string|null", "startDate": "string|null", "endDate": "string|null (null if current)", "responsibilities": ["string"]}],
  "projects": [{"name": "string", "description": "string", "technologies": ["string"], "url": "string|null"}],
  "certifications": [{"name": "string", "issuer": "string|null", "date": "string|null"}]
}

Rules:
1. Only use information present in the text. Use null or empty values for anything missing.
2. Keep dates in the format they appear in.
3. Split skills into technical (tools, languages, frameworks) and soft (interpersonal traits).
4. Each responsibility is one bullet from the resume, lightly cleaned of stray whitespace."#;
