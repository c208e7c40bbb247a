//! Schema migrations: numbered SQL scripts compiled into the binary and applied on request.
//!
//! Every script is idempotent (`IF NOT EXISTS`), so re-running a range is safe.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::Store;

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

/// Ascending by version.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_jobs",
        sql: include_str!("../migrations/0001_create_jobs.sql"),
    },
    Migration {
        version: 2,
        name: "create_resumes",
        sql: include_str!("../migrations/0002_create_resumes.sql"),
    },
    Migration {
        version: 3,
        name: "create_main_resumes",
        sql: include_str!("../migrations/0003_create_main_resumes.sql"),
    },
];

#[derive(Debug, Serialize)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MigrateResponse {
    pub applied: Vec<AppliedMigration>,
}

/// Migrations with `from < version <= to`, in order.
pub fn select_range(from: u32, to: u32) -> Result<Vec<&'static Migration>, AppError> {
    if from >= to {
        return Err(AppError::Validation(format!(
            "Invalid migration range: from ({from}) must be lower than to ({to})"
        )));
    }
    Ok(MIGRATIONS
        .iter()
        .filter(|m| m.version > from && m.version <= to)
        .collect())
}

pub async fn apply(
    store: &dyn Store,
    migrations: &[&'static Migration],
) -> Result<Vec<AppliedMigration>, AppError> {
    let mut applied = Vec::with_capacity(migrations.len());
    for migration in migrations {
        info!("Applying migration {:04}_{}", migration.version, migration.name);
        store.execute_script(migration.sql).await?;
        applied.push(AppliedMigration {
            version: migration.version,
            name: migration.name,
        });
    }
    Ok(applied)
}

/// POST /migrate
pub async fn handle_migrate_all(
    State(state): State<AppState>,
) -> Result<Json<MigrateResponse>, AppError> {
    let all: Vec<&'static Migration> = MIGRATIONS.iter().collect();
    let applied = apply(state.store.as_ref(), &all).await?;
    Ok(Json(MigrateResponse { applied }))
}

/// POST /migrate/:from/:to
pub async fn handle_migrate_range(
    State(state): State<AppState>,
    Path((from, to)): Path<(u32, u32)>,
) -> Result<Json<MigrateResponse>, AppError> {
    let selected = select_range(from, to)?;
    let applied = apply(state.store.as_ref(), &selected).await?;
    Ok(Json(MigrateResponse { applied }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_versions_are_strictly_ascending() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].version < w[1].version));
        assert!(MIGRATIONS.iter().all(|m| m.sql.contains("CREATE TABLE IF NOT EXISTS")));
    }

    #[test]
    fn test_range_is_exclusive_inclusive() {
        let versions: Vec<u32> = select_range(1, 3).unwrap().iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![2, 3]);
        let versions: Vec<u32> = select_range(0, 1).unwrap().iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1]);
        assert!(select_range(3, 99).unwrap().is_empty());
    }

    #[test]
    fn test_empty_or_reversed_range_rejected() {
        assert!(matches!(select_range(2, 2), Err(AppError::Validation(_))));
        assert!(matches!(select_range(3, 1), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_apply_runs_scripts_in_order() {
        let store = MemoryStore::default();
        let selected = select_range(0, 2).unwrap();
        let applied = apply(&store, &selected).await.unwrap();
        assert_eq!(applied.len(), 2);
        let scripts = store.executed_scripts();
        assert!(scripts[0].contains("CREATE TABLE IF NOT EXISTS jobs"));
        assert!(scripts[1].contains("CREATE TABLE IF NOT EXISTS resumes"));
    }
}
