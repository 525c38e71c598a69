//! Extract a bearer token from the `Authorization` header.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

const BEARER_PREFIX: &str = "Bearer ";

/// Token presented by the caller. Not verified: only its presence is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".into()))?
            .to_str()
            .map_err(|_| AppError::Unauthorized("malformed authorization header".into()))?;

        let token = value
            .get(..BEARER_PREFIX.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
            .and_then(|_| value.get(BEARER_PREFIX.len()..))
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("authorization scheme must be Bearer".into()))?;

        if token.is_empty() {
            return Err(AppError::Unauthorized("empty bearer token".into()));
        }
        Ok(BearerToken(token.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        BearerToken::from_headers(&parts.headers)
    }
}
