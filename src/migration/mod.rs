//! Schema migration commands on top of a versioned migration runner.
//!
//! Version tracking, ordering and locking belong to the runner; this module only decides
//! which runner calls a command makes and which outcomes count as success.

mod sqlx_runner;

pub use sqlx_runner::{SqlxMigrationRunner, MIGRATOR};

use crate::error::MigrationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Upper bound on a whole `migrate` invocation.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// One known migration and when it was applied, if ever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied_on: Option<DateTime<Utc>>,
}

impl MigrationStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_on.is_some()
    }
}

/// Narrow interface over a versioned migration runner.
#[async_trait]
pub trait MigrationRunner: Send + Sync {
    /// Apply every pending migration in version order. Returns how many were applied.
    async fn apply_all(&self) -> Result<usize, MigrationError>;

    /// Revert up to `steps` of the most recently applied migrations, newest first.
    /// Returns the reverted versions, or [`MigrationError::NothingToRollBack`] when none
    /// are applied.
    async fn rollback(&self, steps: u32) -> Result<Vec<i64>, MigrationError>;

    /// Every known migration in version order.
    async fn report(&self) -> Result<Vec<MigrationStatus>, MigrationError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down { steps: u32 },
    Redo,
    Status,
}

impl MigrationCommand {
    /// `down` with the step count clamped to at least 1.
    pub fn down(steps: i64) -> Self {
        let steps = u32::try_from(steps.max(1)).unwrap_or(u32::MAX);
        MigrationCommand::Down { steps }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MigrationCommand::Up => "up",
            MigrationCommand::Down { .. } => "down",
            MigrationCommand::Redo => "redo",
            MigrationCommand::Status => "status",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    Applied(usize),
    RolledBack(Vec<i64>),
    Redone { reverted: Vec<i64>, applied: usize },
    Status(Vec<MigrationStatus>),
}

/// Run `command` against `runner`. "Nothing left to roll back" is success.
pub async fn execute<R>(runner: &R, command: MigrationCommand) -> Result<MigrationOutcome, MigrationError>
where
    R: MigrationRunner + ?Sized,
{
    match command {
        MigrationCommand::Up => {
            let applied = runner.apply_all().await?;
            tracing::info!(applied, "migrations applied");
            Ok(MigrationOutcome::Applied(applied))
        }
        MigrationCommand::Down { steps } => {
            let reverted = rollback_or_empty(runner, steps.max(1)).await?;
            tracing::info!(?reverted, "migrations rolled back");
            Ok(MigrationOutcome::RolledBack(reverted))
        }
        MigrationCommand::Redo => {
            let reverted = rollback_or_empty(runner, 1).await?;
            if reverted.is_empty() {
                return Ok(MigrationOutcome::Redone { reverted, applied: 0 });
            }
            let applied = runner.apply_all().await?;
            tracing::info!(?reverted, applied, "migration redone");
            Ok(MigrationOutcome::Redone { reverted, applied })
        }
        MigrationCommand::Status => Ok(MigrationOutcome::Status(runner.report().await?)),
    }
}

async fn rollback_or_empty<R>(runner: &R, steps: u32) -> Result<Vec<i64>, MigrationError>
where
    R: MigrationRunner + ?Sized,
{
    match runner.rollback(steps).await {
        Ok(reverted) => Ok(reverted),
        Err(e) if e.is_benign() => {
            tracing::info!("{}", e);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Render a status report as aligned text lines.
pub fn format_status(report: &[MigrationStatus]) -> Vec<String> {
    let mut lines = vec![format!("{:<20} {:<28} {}", "Applied At", "Version", "Description")];
    for m in report {
        let applied = m
            .applied_on
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Pending".to_string());
        lines.push(format!("{:<20} {:<28} {}", applied, m.version, m.description));
    }
    lines
}
