//! Viewed-jobs cache: the jobs a user recently opened, kept in Redis with a TTL.
//!
//! Best-effort: concurrent writers on the same key are last-writer-wins and
//! expiry is Redis-managed. Callers log failures and carry on.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use uuid::Uuid;

use crate::models::job::JobRow;

const KEY_PREFIX: &str = "viewed_job:";
const SCAN_BATCH: usize = 100;

#[async_trait]
pub trait ViewedJobs: Send + Sync {
    async fn record(&self, job: &JobRow) -> Result<()>;
    async fn list(&self) -> Result<Vec<JobRow>>;
    async fn forget(&self, id: Uuid) -> Result<()>;
}

fn cache_key(id: Uuid) -> String {
    format!("{KEY_PREFIX}{id}")
}

pub struct RedisViewedJobs {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisViewedJobs {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }
}

#[async_trait]
impl ViewedJobs for RedisViewedJobs {
    async fn record(&self, job: &JobRow) -> Result<()> {
        let payload = serde_json::to_string(job)?;
        let mut con = self.connection().await?;
        redis::cmd("SET")
            .arg(cache_key(job.id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut con)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<JobRow>> {
        let mut con = self.connection().await?;

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(format!("{KEY_PREFIX}*"))
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut con)
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        if keys.is_empty() {
            return Ok(Vec::new());
        }
        keys.sort();
        keys.dedup();

        // Keys may expire between SCAN and MGET.
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut con)
            .await?;

        let mut jobs: Vec<JobRow> = values
            .into_iter()
            .flatten()
            .filter_map(|raw| serde_json::from_str(&raw).ok())
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn forget(&self, id: Uuid) -> Result<()> {
        let mut con = self.connection().await?;
        redis::cmd("DEL")
            .arg(cache_key(id))
            .query_async::<_, ()>(&mut con)
            .await?;
        Ok(())
    }
}
