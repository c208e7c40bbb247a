// Prompt templates for résumé tailoring.

pub const TAILOR_ROLE: &str = "You are an expert resume writer and career coach. \
    You tailor an existing resume to a specific job without inventing experience.";

/// Replace `{resume_json}`, `{compatibility_json}` and `{cover_letter_instruction}` before sending.
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Tailor the candidate's resume to the job using the compatibility analysis below.

CURRENT RESUME (JSON):
{resume_json}

COMPATIBILITY ANALYSIS (JSON):
{compatibility_json}

Return the tailored resume as a JSON object with EXACTLY the same schema as the current resume.

Rules:
1. Never add a skill, employer, title, date, degree or certification that is not already in the current resume.
2. skills.technical and skills.soft may be reordered and pruned so the most relevant come first. They must never contain more entries than the original lists.
3. Reword responsibilities to emphasise the required skills where the original supports it. Keep 3 to 5 responsibilities per role.
4. Keep contact details unchanged.
5. Rewrite summary to two or three sentences aimed at this role.
6. {cover_letter_instruction}"#;

pub const COVER_LETTER_INSTRUCTION: &str = "Add a \"coverLetter\" string field: a concise cover letter \
    of three short paragraphs grounded only in the resume.";

pub const NO_COVER_LETTER_INSTRUCTION: &str = "Do not include a coverLetter field.";
