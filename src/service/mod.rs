//! Request validation for the auth DTOs.

pub mod validation;

pub use validation::Validate;
