//! Authentication handlers. Requests are validated; responses are fixed placeholders
//! until credential storage and token issuance exist.

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::response::{
    created, ok, ProfileResponse, RegisterResponse, RegisteredUser, TokenPairResponse, TokenResponse,
};
use crate::service::validation::{email, min_length, required, Validate};
use axum::{http::StatusCode, Json};
use serde::Deserialize;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        required("email", &self.email)?;
        email("email", &self.email)?;
        required("password", &self.password)?;
        min_length("password", &self.password, MIN_PASSWORD_LENGTH)?;
        required("name", &self.name)
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        required("email", &self.email)?;
        email("email", &self.email)?;
        required("password", &self.password)
    }
}

pub async fn register(
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> (StatusCode, Json<RegisterResponse>) {
    tracing::debug!(email = %req.email, "register request accepted");
    created(RegisterResponse {
        message: "User registered successfully",
        user: RegisteredUser {
            email: req.email,
            name: req.name,
        },
    })
}

pub async fn login(
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> (StatusCode, Json<TokenPairResponse>) {
    tracing::debug!(email = %req.email, "login request accepted");
    ok(TokenPairResponse {
        token: "sample-jwt-token",
        refresh_token: "sample-refresh-token",
    })
}

pub async fn refresh() -> (StatusCode, Json<TokenResponse>) {
    ok(TokenResponse {
        token: "new-sample-jwt-token",
    })
}

pub async fn profile() -> (StatusCode, Json<ProfileResponse>) {
    ok(ProfileResponse {
        id: 1,
        email: "user@example.com",
        name: "Sample User",
    })
}
