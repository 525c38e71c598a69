//! `migrate <up|down|redo|status> [--steps=N]`: apply or roll back the embedded SQL migrations.

use api_starter::migration::{format_status, OPERATION_TIMEOUT};
use api_starter::{execute, logging, store, MigrationCommand, MigrationError, MigrationOutcome, Settings, SqlxMigrationRunner};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "migrate", about = "Apply or roll back database migrations")]
struct Cli {
    #[command(subcommand)]
    action: Action,

    /// Number of migrations to roll back with `down` (values below 1 mean 1)
    #[arg(long, global = true, default_value_t = 1, allow_negative_numbers = true)]
    steps: i64,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Action {
    /// Apply all pending migrations
    Up,
    /// Roll back the most recent migrations
    Down,
    /// Roll back the most recent migration and apply it again
    Redo,
    /// Show applied and pending migrations
    Status,
}

impl Cli {
    fn migration_command(&self) -> MigrationCommand {
        match self.action {
            Action::Up => MigrationCommand::Up,
            Action::Down => MigrationCommand::down(self.steps),
            Action::Redo => MigrationCommand::Redo,
            Action::Status => MigrationCommand::Status,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            eprintln!("Usage: migrate <up|down|redo|status> [--steps=N]");
            std::process::exit(1);
        }
    };
    let command = cli.migration_command();

    dotenvy::dotenv().ok();
    let settings = Settings::from_env();
    logging::init(&settings.logging, !settings.app.is_production())?;

    if let Err(e) = run(command, &settings).await {
        tracing::error!(error = %e, "migrations {} failed", command.name());
        return Err(e);
    }
    Ok(())
}

async fn run(command: MigrationCommand, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let options = store::parse_database_url(settings.require_database_url()?)?;
    let runner = SqlxMigrationRunner::connect(options, store::CONNECT_TIMEOUT).await?;

    let outcome = tokio::time::timeout(OPERATION_TIMEOUT, execute(&runner, command))
        .await
        .map_err(|_| MigrationError::Timeout(OPERATION_TIMEOUT))??;

    if let MigrationOutcome::Status(report) = outcome {
        for line in format_status(&report) {
            println!("{}", line);
        }
    }
    Ok(())
}
