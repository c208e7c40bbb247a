//! Persistence boundary. Handlers talk to `dyn Store`; one row per operation,
//! no multi-table transactions.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::models::job::{JobInput, JobRow};
use crate::models::resume::{MainResumeRow, SavedResumeInput, SavedResumeRow};

pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    // Jobs
    async fn create_job(&self, input: &JobInput) -> Result<JobRow, sqlx::Error>;
    /// Newest first.
    async fn list_jobs(&self) -> Result<Vec<JobRow>, sqlx::Error>;
    async fn get_job(&self, id: Uuid) -> Result<Option<JobRow>, sqlx::Error>;
    /// Replaces the editable fields. Inferred fields are only replaced when the
    /// input carries them. Returns `None` when no such job exists.
    async fn update_job(&self, id: Uuid, input: &JobInput) -> Result<Option<JobRow>, sqlx::Error>;
    /// Returns whether a row was deleted.
    async fn delete_job(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    /// Overwrites `inferred_job` wholesale.
    async fn set_inferred_job(&self, id: Uuid, inferred: &Value) -> Result<bool, sqlx::Error>;
    /// Overwrites `inferred_job_match` wholesale.
    async fn set_inferred_match(&self, id: Uuid, matrix: &Value) -> Result<bool, sqlx::Error>;

    // Saved résumés
    async fn create_resume(&self, input: &SavedResumeInput) -> Result<SavedResumeRow, sqlx::Error>;
    /// Newest first, optionally restricted to one job.
    async fn list_resumes(&self, job_id: Option<Uuid>) -> Result<Vec<SavedResumeRow>, sqlx::Error>;
    async fn get_resume(&self, id: Uuid) -> Result<Option<SavedResumeRow>, sqlx::Error>;
    async fn update_resume(
        &self,
        id: Uuid,
        input: &SavedResumeInput,
    ) -> Result<Option<SavedResumeRow>, sqlx::Error>;
    async fn delete_resume(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // Main résumé
    async fn get_main_resume(&self) -> Result<Option<MainResumeRow>, sqlx::Error>;
    /// Upserts the singleton. A `None` file name keeps the previously stored one.
    async fn put_main_resume(
        &self,
        resume: &Value,
        file_name: Option<&str>,
    ) -> Result<MainResumeRow, sqlx::Error>;

    /// Runs a raw, possibly multi-statement SQL script.
    async fn execute_script(&self, sql: &str) -> Result<(), sqlx::Error>;
}
