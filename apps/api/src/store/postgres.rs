use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{Executor, PgPool};
use tracing::info;
use uuid::Uuid;

use super::Store;
use crate::models::job::{JobInput, JobRow};
use crate::models::resume::{MainResumeRow, SavedResumeInput, SavedResumeRow};

/// `Store` over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates the connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_job(&self, input: &JobInput) -> Result<JobRow, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs
                (id, company_name, job_title, job_description, url, job_type, location,
                 technical_skills, soft_skills, inferred_job, inferred_job_match)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.company_name)
        .bind(&input.job_title)
        .bind(&input.job_description)
        .bind(&input.url)
        .bind(&input.job_type)
        .bind(&input.location)
        .bind(&input.technical_skills)
        .bind(&input.soft_skills)
        .bind(&input.inferred_job)
        .bind(&input.inferred_job_match)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_job(&self, id: Uuid, input: &JobInput) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs SET
                company_name = $2,
                job_title = $3,
                job_description = $4,
                url = $5,
                job_type = $6,
                location = $7,
                technical_skills = $8,
                soft_skills = $9,
                inferred_job = COALESCE($10, inferred_job),
                inferred_job_match = COALESCE($11, inferred_job_match)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.company_name)
        .bind(&input.job_title)
        .bind(&input.job_description)
        .bind(&input.url)
        .bind(&input.job_type)
        .bind(&input.location)
        .bind(&input.technical_skills)
        .bind(&input.soft_skills)
        .bind(&input.inferred_job)
        .bind(&input.inferred_job_match)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_inferred_job(&self, id: Uuid, inferred: &Value) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE jobs SET inferred_job = $2 WHERE id = $1")
            .bind(id)
            .bind(inferred)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_inferred_match(&self, id: Uuid, matrix: &Value) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE jobs SET inferred_job_match = $2 WHERE id = $1")
            .bind(id)
            .bind(matrix)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_resume(&self, input: &SavedResumeInput) -> Result<SavedResumeRow, sqlx::Error> {
        sqlx::query_as::<_, SavedResumeRow>(
            r#"
            INSERT INTO resumes
                (id, job_id, updated_resume, technical_skills, soft_skills, cover_letter)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.job_id)
        .bind(Json(&input.updated_resume))
        .bind(&input.technical_skills)
        .bind(&input.soft_skills)
        .bind(&input.cover_letter)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_resumes(&self, job_id: Option<Uuid>) -> Result<Vec<SavedResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, SavedResumeRow>(
            r#"
            SELECT * FROM resumes
            WHERE ($1::uuid IS NULL OR job_id = $1)
            ORDER BY created_on DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_resume(&self, id: Uuid) -> Result<Option<SavedResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, SavedResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_resume(
        &self,
        id: Uuid,
        input: &SavedResumeInput,
    ) -> Result<Option<SavedResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, SavedResumeRow>(
            r#"
            UPDATE resumes SET
                job_id = $2,
                updated_resume = $3,
                technical_skills = $4,
                soft_skills = $5,
                cover_letter = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.job_id)
        .bind(Json(&input.updated_resume))
        .bind(&input.technical_skills)
        .bind(&input.soft_skills)
        .bind(&input.cover_letter)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_resume(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_main_resume(&self) -> Result<Option<MainResumeRow>, sqlx::Error> {
        sqlx::query_as::<_, MainResumeRow>("SELECT * FROM main_resumes WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
    }

    async fn put_main_resume(
        &self,
        resume: &Value,
        file_name: Option<&str>,
    ) -> Result<MainResumeRow, sqlx::Error> {
        sqlx::query_as::<_, MainResumeRow>(
            r#"
            INSERT INTO main_resumes (id, resume, file_name, updated_at)
            VALUES (1, $1, $2, now())
            ON CONFLICT (id) DO UPDATE SET
                resume = EXCLUDED.resume,
                file_name = COALESCE(EXCLUDED.file_name, main_resumes.file_name),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(resume)
        .bind(file_name)
        .fetch_one(&self.pool)
        .await
    }

    async fn execute_script(&self, sql: &str) -> Result<(), sqlx::Error> {
        // Unprepared execution allows multiple statements per script.
        self.pool.execute(sql).await?;
        Ok(())
    }
}
