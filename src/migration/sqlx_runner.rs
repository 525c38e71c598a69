//! [`MigrationRunner`] backed by the sqlx migrator and its `_sqlx_migrations` table.

use super::{MigrationRunner, MigrationStatus};
use crate::error::MigrationError;
use crate::store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::migrate::{Migrate, Migrator};
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;

/// SQL migrations embedded from `migrations/` at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub struct SqlxMigrationRunner {
    pool: PgPool,
    migrator: &'static Migrator,
}

impl SqlxMigrationRunner {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            migrator: &MIGRATOR,
        }
    }

    /// Single-connection pool; gives up after `timeout`.
    pub async fn connect(options: PgConnectOptions, timeout: Duration) -> Result<Self, MigrationError> {
        let pool = tokio::time::timeout(timeout, store::connect(options, 1, timeout))
            .await
            .map_err(|_| MigrationError::Timeout(timeout))?
            .map_err(MigrationError::Connect)?;
        Ok(Self::new(pool))
    }

    /// Applied versions, ascending, with their install time.
    async fn applied(&self) -> Result<Vec<(i64, DateTime<Utc>)>, MigrationError> {
        let mut conn = self.pool.acquire().await?;
        conn.ensure_migrations_table().await?;
        let rows: Vec<(i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT version, installed_on FROM _sqlx_migrations WHERE success ORDER BY version",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    fn up_migrations(&self) -> impl Iterator<Item = &sqlx::migrate::Migration> {
        self.migrator
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
    }
}

/// Versions to revert (newest first) and the version `Migrator::undo` should stop at,
/// given the applied versions in ascending order. `undo` reverts everything newer than
/// the target; 0 means revert all.
fn undo_target(applied: &[i64], steps: u32) -> (Vec<i64>, i64) {
    let n = usize::try_from(steps).unwrap_or(usize::MAX).min(applied.len());
    let reverted = applied.iter().rev().take(n).copied().collect();
    let target = applied.iter().rev().nth(n).copied().unwrap_or(0);
    (reverted, target)
}

#[async_trait]
impl MigrationRunner for SqlxMigrationRunner {
    async fn apply_all(&self) -> Result<usize, MigrationError> {
        let applied: Vec<i64> = self.applied().await?.into_iter().map(|(v, _)| v).collect();
        let pending = self
            .up_migrations()
            .filter(|m| !applied.contains(&m.version))
            .count();
        self.migrator.run(&self.pool).await?;
        Ok(pending)
    }

    async fn rollback(&self, steps: u32) -> Result<Vec<i64>, MigrationError> {
        let applied = self.applied().await?;
        if applied.is_empty() {
            return Err(MigrationError::NothingToRollBack);
        }
        let versions: Vec<i64> = applied.into_iter().map(|(v, _)| v).collect();
        let (reverted, target_version) = undo_target(&versions, steps);
        tracing::debug!(target_version, ?reverted, "reverting migrations");
        self.migrator.undo(&self.pool, target_version).await?;
        Ok(reverted)
    }

    async fn report(&self) -> Result<Vec<MigrationStatus>, MigrationError> {
        let applied: HashMap<i64, DateTime<Utc>> = self.applied().await?.into_iter().collect();
        Ok(self
            .up_migrations()
            .map(|m| MigrationStatus {
                version: m.version,
                description: m.description.to_string(),
                applied_on: applied.get(&m.version).copied(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLIED: [i64; 3] = [20240101000001, 20240101000002, 20240101000003];

    #[test]
    fn undo_target_stops_below_reverted_versions() {
        assert_eq!(undo_target(&APPLIED, 1), (vec![20240101000003], 20240101000002));
        assert_eq!(
            undo_target(&APPLIED, 2),
            (vec![20240101000003, 20240101000002], 20240101000001)
        );
    }

    #[test]
    fn undo_target_reverting_everything_targets_zero() {
        assert_eq!(
            undo_target(&APPLIED, 3),
            (vec![20240101000003, 20240101000002, 20240101000001], 0)
        );
    }

    #[test]
    fn undo_target_caps_steps_at_history() {
        assert_eq!(undo_target(&APPLIED, 10), undo_target(&APPLIED, 3));
        assert_eq!(undo_target(&APPLIED[..1], u32::MAX), (vec![20240101000001], 0));
    }

    #[test]
    fn embedded_migrations_are_reversible_and_ordered() {
        let ups: Vec<_> = MIGRATOR
            .iter()
            .filter(|m| !m.migration_type.is_down_migration())
            .collect();
        assert!(!ups.is_empty());
        assert!(ups.windows(2).all(|w| w[0].version < w[1].version));
        for up in &ups {
            assert!(
                MIGRATOR
                    .iter()
                    .any(|m| m.version == up.version && m.migration_type.is_down_migration()),
                "migration {} has no down script",
                up.version
            );
        }
    }
}
