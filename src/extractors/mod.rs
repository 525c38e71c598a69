//! Request extractors shared by handlers and middleware.

pub mod bearer;
pub mod json;

pub use bearer::BearerToken;
pub use json::ValidatedJson;
