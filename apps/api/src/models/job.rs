use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub job_description: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub inferred_job: Option<Value>,
    pub inferred_job_match: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or replacing a job.
///
/// Accepts both field spellings used by clients (`jobTitle`/`post`,
/// `jobDescription`/`text`, `technicalSkills`/`skills`). Skills may be a JSON
/// array or a single comma/semicolon/newline delimited string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub company_name: Option<String>,
    #[serde(alias = "post")]
    pub job_title: Option<String>,
    #[serde(alias = "text", default)]
    pub job_description: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "skills", default, deserialize_with = "skill_list")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "skill_list")]
    pub soft_skills: Vec<String>,
    pub inferred_job: Option<Value>,
    pub inferred_job_match: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsField {
    List(Vec<String>),
    Delimited(String),
    Missing(()),
}

fn skill_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = match SkillsField::deserialize(deserializer)? {
        SkillsField::List(items) => items,
        SkillsField::Delimited(s) => s
            .split([',', ';', '\n'])
            .map(str::to_string)
            .collect(),
        SkillsField::Missing(()) => Vec::new(),
    };
    Ok(raw
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
