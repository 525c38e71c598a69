//! Route groups mounted under the versioned API prefix.

pub mod auth;
pub mod common;

pub use auth::{auth_routes, protected_routes, require_auth};
pub use common::common_routes;
