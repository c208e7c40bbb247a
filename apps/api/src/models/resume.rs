use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use super::null_as_default;

// ────────────────────────────────────────────────────────────────────────────
// Résumé document: the JSON shape shared by the main résumé and snapshots
// ────────────────────────────────────────────────────────────────────────────

/// A structured résumé. Every field defaults so partial model output still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    #[serde(deserialize_with = "null_as_default")]
    pub technical: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    /// `None` means current position.
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
}

impl ResumeDocument {
    /// True when nothing meaningful was extracted.
    pub fn is_blank(&self) -> bool {
        self.contact.name.trim().is_empty()
            && self.summary.trim().is_empty()
            && self.skills.technical.is_empty()
            && self.work_experience.is_empty()
            && self.education.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Saved résumé snapshots
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedResumeRow {
    pub id: Uuid,
    pub job_id: Option<Uuid>,
    pub updated_resume: Value,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub cover_letter: Option<String>,
    pub created_on: DateTime<Utc>,
}

impl SavedResumeRow {
    pub fn document(&self) -> Result<ResumeDocument, serde_json::Error> {
        serde_json::from_value(self.updated_resume.clone())
    }
}

/// Request body for creating or replacing a snapshot. Replaces the whole row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResumeInput {
    pub job_id: Option<Uuid>,
    pub updated_resume: ResumeDocument,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    pub cover_letter: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Main résumé singleton
// ────────────────────────────────────────────────────────────────────────────

/// The single row with `id = 1` holding the canonical résumé.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MainResumeRow {
    #[serde(skip_serializing)]
    pub id: i16,
    pub resume: Value,
    /// Object-store name of the original upload, if any.
    pub file_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl MainResumeRow {
    pub fn document(&self) -> Result<ResumeDocument, serde_json::Error> {
        serde_json::from_value(self.resume.clone())
    }
}
