//! In-process `Store` for handler tests. Mirrors the Postgres semantics that
//! handlers depend on (newest-first ordering, `ON DELETE SET NULL`, singleton upsert).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::Store;
use crate::models::job::{JobInput, JobRow};
use crate::models::resume::{MainResumeRow, SavedResumeInput, SavedResumeRow};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
    fail_main_resume_writes: AtomicBool,
}

#[derive(Default)]
struct Tables {
    jobs: Vec<JobRow>,
    resumes: Vec<SavedResumeRow>,
    main: Option<MainResumeRow>,
    scripts: Vec<String>,
}

impl MemoryStore {
    pub fn executed_scripts(&self) -> Vec<String> {
        self.inner.lock().unwrap().scripts.clone()
    }

    /// Makes `put_main_resume` fail as if the pool were exhausted.
    pub fn fail_main_resume_writes(&self, fail: bool) {
        self.fail_main_resume_writes.store(fail, Ordering::SeqCst);
    }
}

fn saved_row(id: Uuid, input: &SavedResumeInput) -> SavedResumeRow {
    SavedResumeRow {
        id,
        job_id: input.job_id,
        updated_resume: serde_json::to_value(&input.updated_resume).unwrap(),
        technical_skills: input.technical_skills.clone(),
        soft_skills: input.soft_skills.clone(),
        cover_letter: input.cover_letter.clone(),
        created_on: Utc::now(),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_job(&self, input: &JobInput) -> Result<JobRow, sqlx::Error> {
        let row = JobRow {
            id: Uuid::new_v4(),
            company_name: input.company_name.clone(),
            job_title: input.job_title.clone(),
            job_description: input.job_description.clone(),
            url: input.url.clone(),
            job_type: input.job_type.clone(),
            location: input.location.clone(),
            technical_skills: input.technical_skills.clone(),
            soft_skills: input.soft_skills.clone(),
            inferred_job: input.inferred_job.clone(),
            inferred_job_match: input.inferred_job_match.clone(),
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().jobs.push(row.clone());
        Ok(row)
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, sqlx::Error> {
        Ok(self.inner.lock().unwrap().jobs.iter().rev().cloned().collect())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
        Ok(self.inner.lock().unwrap().jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn update_job(&self, id: Uuid, input: &JobInput) -> Result<Option<JobRow>, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let Some(job) = tables.jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        job.company_name = input.company_name.clone();
        job.job_title = input.job_title.clone();
        job.job_description = input.job_description.clone();
        job.url = input.url.clone();
        job.job_type = input.job_type.clone();
        job.location = input.location.clone();
        job.technical_skills = input.technical_skills.clone();
        job.soft_skills = input.soft_skills.clone();
        if input.inferred_job.is_some() {
            job.inferred_job = input.inferred_job.clone();
        }
        if input.inferred_job_match.is_some() {
            job.inferred_job_match = input.inferred_job_match.clone();
        }
        Ok(Some(job.clone()))
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let before = tables.jobs.len();
        tables.jobs.retain(|j| j.id != id);
        let deleted = tables.jobs.len() < before;
        if deleted {
            for resume in tables.resumes.iter_mut().filter(|r| r.job_id == Some(id)) {
                resume.job_id = None;
            }
        }
        Ok(deleted)
    }

    async fn set_inferred_job(&self, id: Uuid, inferred: &Value) -> Result<bool, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        Ok(match tables.jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.inferred_job = Some(inferred.clone());
                true
            }
            None => false,
        })
    }

    async fn set_inferred_match(&self, id: Uuid, matrix: &Value) -> Result<bool, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        Ok(match tables.jobs.iter_mut().find(|j| j.id == id) {
            Some(job) => {
                job.inferred_job_match = Some(matrix.clone());
                true
            }
            None => false,
        })
    }

    async fn create_resume(&self, input: &SavedResumeInput) -> Result<SavedResumeRow, sqlx::Error> {
        let row = saved_row(Uuid::new_v4(), input);
        self.inner.lock().unwrap().resumes.push(row.clone());
        Ok(row)
    }

    async fn list_resumes(&self, job_id: Option<Uuid>) -> Result<Vec<SavedResumeRow>, sqlx::Error> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .resumes
            .iter()
            .rev()
            .filter(|r| job_id.is_none() || r.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn get_resume(&self, id: Uuid) -> Result<Option<SavedResumeRow>, sqlx::Error> {
        Ok(self.inner.lock().unwrap().resumes.iter().find(|r| r.id == id).cloned())
    }

    async fn update_resume(
        &self,
        id: Uuid,
        input: &SavedResumeInput,
    ) -> Result<Option<SavedResumeRow>, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let Some(existing) = tables.resumes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let created_on = existing.created_on;
        *existing = SavedResumeRow {
            created_on,
            ..saved_row(id, input)
        };
        Ok(Some(existing.clone()))
    }

    async fn delete_resume(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let before = tables.resumes.len();
        tables.resumes.retain(|r| r.id != id);
        Ok(tables.resumes.len() < before)
    }

    async fn get_main_resume(&self) -> Result<Option<MainResumeRow>, sqlx::Error> {
        Ok(self.inner.lock().unwrap().main.clone())
    }

    async fn put_main_resume(
        &self,
        resume: &Value,
        file_name: Option<&str>,
    ) -> Result<MainResumeRow, sqlx::Error> {
        if self.fail_main_resume_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let mut tables = self.inner.lock().unwrap();
        let file_name = file_name
            .map(str::to_string)
            .or_else(|| tables.main.as_ref().and_then(|m| m.file_name.clone()));
        let row = MainResumeRow {
            id: 1,
            resume: resume.clone(),
            file_name,
            updated_at: Utc::now(),
        };
        tables.main = Some(row.clone());
        Ok(row)
    }

    async fn execute_script(&self, sql: &str) -> Result<(), sqlx::Error> {
        self.inner.lock().unwrap().scripts.push(sql.to_string());
        Ok(())
    }
}
