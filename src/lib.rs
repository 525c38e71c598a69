//! API starter: environment-driven settings, a versioned axum API with placeholder auth,
//! and a migration runner for the companion `migrate` binary.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, MigrationError};
pub use migration::{execute, MigrationCommand, MigrationOutcome, MigrationRunner, SqlxMigrationRunner};
pub use server::{build_router, serve, serve_with_shutdown};
pub use state::AppState;
