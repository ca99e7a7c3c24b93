//! Registration, login and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{password, session};
use crate::errors::AppError;
use crate::models::account;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account_id: Uuid,
    pub email: String,
    pub token: String,
}

/// POST /api/v1/auth/register
/// Creates an account and establishes a session. Duplicate emails conflict
/// without mutating anything.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash = password::hash_password(&req.password)?;
    let created = account::create(&state.db, &req.email, &password_hash).await?;

    let token = session::issue(created.id, &state.config.session_secret)
        .map_err(|e| AppError::Internal(e.into()))?;

    info!("Registered account {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            account_id: created.id,
            email: created.email,
            token,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let found = account::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&req.password, &found.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = session::issue(found.id, &state.config.session_secret)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(SessionResponse {
        account_id: found.id,
        email: found.email,
        token,
    }))
}

/// POST /api/v1/auth/logout
/// Sessions are stateless bearer tokens; logout is an acknowledgement and the
/// client discards its token.
pub async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}
