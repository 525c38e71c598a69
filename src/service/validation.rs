//! Request validation rules for incoming DTOs.

use crate::error::AppError;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Field-level checks run after a body deserializes.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Present and non-empty. Whitespace counts as a value.
pub fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    let re = Regex::new(EMAIL_PATTERN)
        .map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
    if !re.is_match(value) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn min_length(field: &str, value: &str, min: usize) -> Result<(), AppError> {
    if value.chars().count() < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(res: Result<(), AppError>) -> String {
        match res {
            Err(AppError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn required_rejects_only_empty() {
        assert_eq!(message(required("name", "")), "name is required");
        assert!(required("name", "   ").is_ok());
        assert!(required("name", "Ada").is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(email("email", "ada@example.com").is_ok());
        assert!(email("email", "a.b+tag@mail.example.org").is_ok());
        for bad in ["ada", "ada@", "@example.com", "ada@example", "ada @example.com"] {
            assert_eq!(message(email("email", bad)), "email must be a valid email", "{bad}");
        }
    }

    #[test]
    fn min_length_counts_characters() {
        assert!(min_length("password", "12345678", 8).is_ok());
        assert_eq!(
            message(min_length("password", "1234567", 8)),
            "password must be at least 8 characters"
        );
        // 4 characters, 8 bytes
        assert!(min_length("password", "éééé", 8).is_err());
    }
}
