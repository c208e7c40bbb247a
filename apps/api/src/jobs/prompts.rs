// Prompt templates for job inference and résumé/job compatibility.

pub const JOB_INFER_ROLE: &str = "You are an expert job description analyst. \
    Extract structured facts from job postings exactly as stated; never invent details.";

/// Replace `{description}` and `{additional_fields}` before sending.
pub const JOB_INFER_PROMPT_TEMPLATE: &str = r#"Extract structured information from the job description below.

JOB DESCRIPTION:
{description}

Return a JSON object with this EXACT schema:
{
  "companyName": "string (empty if not stated)",
  "jobTitle": "string",
  "typeOfJob": "full-time | part-time | contract | internship | temporary | unknown",
  "isRemote": true,
  "location": "string (empty if not stated)",
  "technicalSkills": ["string"],
  "softSkills": ["string"],
  "sugercoatingRating": 3,
  "sugercoatingRatingReason": "string",
  "additionalFields": {}
}

Rules:
1. technicalSkills are concrete tools, languages, frameworks and platforms. softSkills are interpersonal or work-style traits.
2. Deduplicate skills and keep the wording used in the posting.
3. sugercoatingRating is an integer from 1 to 5 measuring how much the posting dresses up the role (1 = plain and factual, 5 = heavy marketing language hiding the actual work). Explain the score in sugercoatingRatingReason in one or two sentences.
4. {additional_fields}
5. Return ONLY the JSON object."#;

pub const NO_ADDITIONAL_FIELDS: &str = "Leave additionalFields as an empty object.";

pub const COMPATIBILITY_ROLE: &str = "You are an expert technical recruiter. \
    Compare a candidate's résumé with a job description honestly; do not inflate the fit.";

/// Replace `{description}` and `{resume_json}` before sending.
pub const COMPATIBILITY_PROMPT_TEMPLATE: &str = r#"Assess how well the candidate's résumé matches the job description.

JOB DESCRIPTION:
{description}

CANDIDATE RÉSUMÉ (JSON):
{resume_json}

Return a JSON object with this EXACT schema:
{
  "matchPercentage": 72,
  "matchReason": "string",
  "requiredSkills": {
    "softSkills": ["string"],
    "techSkills": ["string"]
  }
}

Rules:
1. matchPercentage is an integer from 0 to 100.
2. matchReason summarises strengths and gaps in 2-4 sentences.
3. requiredSkills lists the skills the job requires, split into soft and technical skills.
4. Return ONLY the JSON object."#;
