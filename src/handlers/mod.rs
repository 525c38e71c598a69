//! HTTP handlers for health checks and authentication.

pub mod auth;
pub mod health;
pub use auth::*;
pub use health::*;
