//! Session authentication for the portfolio API.
//!
//! Credentials are verified against an Argon2id hash; a short-lived HS256
//! token carries the account id between requests. `AuthSession` is the
//! request-scoped context every authorized operation receives — there is no
//! ambient current-user state.

pub mod password;
pub mod session;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::errors::AppError;
use crate::models::account::{self, AccountRow};
use crate::state::AppState;

/// Authenticated request context. Extracting it rejects the request with
/// `401 UNAUTHORIZED` when the bearer token is missing, invalid or expired,
/// or the account no longer exists.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: AccountRow,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let claims = session::verify(token, &state.config.session_secret)
            .map_err(|_| AppError::Unauthorized)?;

        // Re-read the account so the premium flag is always current.
        let account = account::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthSession { account })
    }
}
